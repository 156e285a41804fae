//! Local filesystem storage.
//!
//! Reads conversion inputs, writes filtered outputs atomically, and keeps
//! an append-only audit trail of conversions.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── config.toml           # Configuration
//! └── audit/                # Conversion audit records
//!     └── YYYY/
//!         └── MM.json
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};
use crate::models::DiffReport;

/// Audit record for a single conversion.
///
/// Stands in for the original deployment's audit channel: file identities
/// are recorded as SHA-256 fingerprints rather than file copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRecord {
    /// When the conversion ran (UTC)
    pub timestamp: DateTime<Utc>,

    /// Path of the old (baseline) file
    pub old_file: String,

    /// Path of the new (candidate) file
    pub new_file: String,

    /// Path the filtered result was written to
    pub updated_file: String,

    /// SHA-256 of the old file contents
    pub old_sha256: String,

    /// SHA-256 of the new file contents
    pub new_sha256: String,

    /// SHA-256 of the filtered result
    pub updated_sha256: String,

    /// Summary counters for the conversion
    pub report: DiffReport,
}

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    fn ensure_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
        Self::ensure_dir(path)?;

        let tmp = path.with_extension("tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.flush()?;
        drop(file);

        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Read a text file into its lines.
    pub fn read_lines(path: &Path) -> Result<Vec<String>> {
        let content = fs::read_to_string(path)?;
        Ok(content.lines().map(String::from).collect())
    }

    /// Write lines to a file atomically, joined with newlines.
    pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
        Self::write_bytes(path, lines.join("\n").as_bytes())
    }

    /// Derive the updated-file path next to the new file:
    /// `new.txt` becomes `new_updated.txt`.
    pub fn updated_path(new_path: &Path) -> PathBuf {
        let stem = new_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("updated");
        let name = match new_path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{stem}_updated.{ext}"),
            None => format!("{stem}_updated"),
        };
        new_path.with_file_name(name)
    }

    /// SHA-256 fingerprint of a file's contents, hex-encoded.
    pub fn fingerprint(path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        let digest = Sha256::digest(&bytes);
        Ok(hex::encode(digest))
    }

    /// Audit partition key for a given year/month.
    fn audit_key(year: i32, month: u32) -> String {
        format!("audit/{}/{:02}.json", year, month)
    }

    /// Append a conversion record to its monthly audit partition.
    ///
    /// Records are partitioned by their own timestamp, so replayed or
    /// backfilled conversions land in the month they claim.
    pub fn record_conversion(&self, record: &ConversionRecord) -> Result<()> {
        let key = Self::audit_key(record.timestamp.year(), record.timestamp.month());
        let path = self.path(&key);

        let mut records: Vec<ConversionRecord> = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(AppError::Io(e)),
        };
        records.push(record.clone());

        let bytes = serde_json::to_vec_pretty(&records)?;
        Self::write_bytes(&path, &bytes)
    }

    /// Read the audit records for the month containing `at`.
    pub fn audit_records(&self, at: &DateTime<Utc>) -> Result<Vec<ConversionRecord>> {
        let path = self.path(&Self::audit_key(at.year(), at.month()));
        match fs::read(&path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}
