//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Key derivation settings
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    /// Media extension settings for report counters
    #[serde(default)]
    pub media: MediaConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.media.video_extensions.is_empty() {
            return Err(AppError::validation("media.video_extensions is empty"));
        }
        if self.media.document_extensions.is_empty() {
            return Err(AppError::validation("media.document_extensions is empty"));
        }
        for ext in self
            .media
            .video_extensions
            .iter()
            .chain(&self.media.document_extensions)
        {
            if !ext.starts_with('.') {
                return Err(AppError::validation(format!(
                    "media extension '{ext}' must start with '.'"
                )));
            }
        }
        for param in &self.normalizer.extra_tracking_params {
            if param.trim().is_empty() {
                return Err(AppError::validation(
                    "normalizer.extra_tracking_params contains an empty name",
                ));
            }
        }
        Ok(())
    }
}

/// Comparison policy for deriving keys from lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CompareMode {
    /// Compare by the normalized extracted link
    #[default]
    Link,

    /// Compare by the normalized full line
    FullLine,
}

/// Key derivation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Whether keys are derived from the extracted link or the full line
    #[serde(default)]
    pub compare: CompareMode,

    /// Strip tracking query parameters before comparison
    #[serde(default = "defaults::strip_tracking")]
    pub strip_tracking: bool,

    /// Additional tracking parameter names beyond the built-in set
    #[serde(default)]
    pub extra_tracking_params: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            compare: CompareMode::default(),
            strip_tracking: defaults::strip_tracking(),
            extra_tracking_params: Vec::new(),
        }
    }
}

/// Media extension settings for report counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// File extensions counted as videos
    #[serde(default = "defaults::video_extensions")]
    pub video_extensions: Vec<String>,

    /// File extensions counted as documents
    #[serde(default = "defaults::document_extensions")]
    pub document_extensions: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            video_extensions: defaults::video_extensions(),
            document_extensions: defaults::document_extensions(),
        }
    }
}

mod defaults {
    pub fn strip_tracking() -> bool {
        true
    }

    pub fn video_extensions() -> Vec<String> {
        vec![".mp4".into(), ".mkv".into(), ".mov".into(), ".avi".into()]
    }

    pub fn document_extensions() -> Vec<String> {
        vec![".pdf".into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_video_extensions() {
        let mut config = Config::default();
        config.media.video_extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_extension_without_dot() {
        let mut config = Config::default();
        config.media.document_extensions = vec!["pdf".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_tracking_param() {
        let mut config = Config::default();
        config.normalizer.extra_tracking_params = vec!["  ".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn parse_compare_mode_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [normalizer]
            compare = "full-line"
            strip_tracking = false
            "#,
        )
        .unwrap();
        assert_eq!(config.normalizer.compare, CompareMode::FullLine);
        assert!(!config.normalizer.strip_tracking);
    }

    #[test]
    fn defaults_strip_tracking_on() {
        let config = Config::default();
        assert_eq!(config.normalizer.compare, CompareMode::Link);
        assert!(config.normalizer.strip_tracking);
    }
}
