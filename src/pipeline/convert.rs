// src/pipeline/convert.rs

//! Full conversion pipeline: read, diff, write, audit.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{Config, DiffReport};
use crate::pipeline::DiffEngine;
use crate::storage::{ConversionRecord, LocalStorage};

/// Options for a single conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Output path override; defaults to `<new stem>_updated.<ext>`
    pub output: Option<PathBuf>,
    /// Whether to append an audit record
    pub audit: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output: None,
            audit: true,
        }
    }
}

/// Result of a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    /// Where the filtered lines were written
    pub updated_path: PathBuf,
    /// Summary counters
    pub report: DiffReport,
}

/// Filter the new file against the old baseline and write the result.
pub fn run_convert(
    config: &Config,
    storage: &LocalStorage,
    old_path: &Path,
    new_path: &Path,
    options: &ConvertOptions,
) -> Result<ConvertOutcome> {
    if old_path == new_path {
        return Err(AppError::validation(
            "old and new refer to the same file",
        ));
    }

    let old_lines = LocalStorage::read_lines(old_path)?;
    let new_lines = LocalStorage::read_lines(new_path)?;
    log::info!(
        "Loaded {} old lines and {} new lines",
        old_lines.len(),
        new_lines.len()
    );

    let engine = DiffEngine::with_config(config.normalizer.clone(), config.media.clone());
    let outcome = engine.run(&old_lines, &new_lines);
    log::info!(
        "Kept {} of {} new lines ({} removed)",
        outcome.report.kept,
        outcome.report.total_new,
        outcome.report.removed
    );

    let updated_path = options
        .output
        .clone()
        .unwrap_or_else(|| LocalStorage::updated_path(new_path));
    LocalStorage::write_lines(&updated_path, &outcome.lines)?;
    log::info!("Wrote updated file to {}", updated_path.display());

    if options.audit {
        let record = ConversionRecord {
            timestamp: Utc::now(),
            old_file: old_path.display().to_string(),
            new_file: new_path.display().to_string(),
            updated_file: updated_path.display().to_string(),
            old_sha256: LocalStorage::fingerprint(old_path)?,
            new_sha256: LocalStorage::fingerprint(new_path)?,
            updated_sha256: LocalStorage::fingerprint(&updated_path)?,
            report: outcome.report.clone(),
        };
        storage.record_conversion(&record)?;
        log::info!("Audit record appended");
    }

    Ok(ConvertOutcome {
        updated_path,
        report: outcome.report,
    })
}
