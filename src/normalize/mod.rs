// src/normalize/mod.rs

//! Line normalization into stable comparison keys.
//!
//! A key is only ever used for equality and set membership; it is never
//! shown to the user. Normalization is total and pure: any input line maps
//! to exactly one key, with no I/O and no external state.

mod canonical;
mod extract;

pub use canonical::{canonicalize_url, is_tracking_param};
pub use extract::{Extracted, Strategy, extract};

use percent_encoding::percent_decode_str;

use crate::models::{CompareMode, NormalizerConfig};

/// Derives comparison keys from raw lines.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Create a normalizer with the default policy
    /// (compare by link, strip tracking parameters).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a normalizer with a custom policy.
    pub fn with_config(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Derive the comparison key for a line.
    ///
    /// Empty lines map to the empty key; callers are expected to skip
    /// them before calling.
    pub fn key(&self, line: &str) -> String {
        let line = line.trim();
        if line.is_empty() {
            return String::new();
        }

        let decoded = percent_decode_str(line).decode_utf8_lossy();

        if self.config.compare == CompareMode::FullLine {
            return decoded.trim().to_lowercase();
        }

        let extracted = extract(&decoded);
        if extracted.is_url() {
            if let Some(key) = canonicalize_url(
                extracted.token,
                self.config.strip_tracking,
                &self.config.extra_tracking_params,
            ) {
                return key;
            }
        }

        extracted.token.trim().to_lowercase()
    }
}

/// Derive a comparison key with the default policy.
pub fn normalize(line: &str) -> String {
    Normalizer::new().key(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_function() {
        let line = "Movie1: https://Example.com/a/b/?utm_source=x";
        assert_eq!(normalize(line), normalize(line));
    }

    #[test]
    fn test_empty_line_maps_to_empty_key() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_equivalence_under_noise() {
        assert_eq!(
            normalize("https://Example.com/a/b/?utm_source=x"),
            normalize("https://example.com/a/b?utm_source=y")
        );
        assert_eq!(normalize("https://Example.com/a/b/?utm_source=x"), "example.com/a/b");
    }

    #[test]
    fn test_trailing_slash_insensitive() {
        assert_eq!(normalize("https://x.com/p/"), normalize("https://x.com/p"));
    }

    #[test]
    fn test_www_insensitive() {
        assert_eq!(normalize("https://www.x.com/p"), normalize("https://x.com/p"));
    }

    #[test]
    fn test_percent_encoding_insensitive() {
        assert_eq!(
            normalize("https://x.com/a%2Fb"),
            normalize("https://x.com/a/b")
        );
    }

    #[test]
    fn test_title_prefix_ignored_in_link_mode() {
        assert_eq!(
            normalize("Movie1: https://x.com/v.mp4"),
            normalize("Copy Of Movie1: https://x.com/v.mp4")
        );
    }

    #[test]
    fn test_plain_text_lowercased() {
        assert_eq!(normalize("Some File.MP4"), "file.mp4");
        assert_eq!(normalize("Movie: File.MKV"), "file.mkv");
    }

    #[test]
    fn test_whole_line_fallback() {
        assert_eq!(normalize("Token"), "token");
    }

    #[test]
    fn test_full_line_mode_keeps_title() {
        let normalizer = Normalizer::with_config(NormalizerConfig {
            compare: CompareMode::FullLine,
            ..NormalizerConfig::default()
        });
        assert_ne!(
            normalizer.key("Movie1: https://x.com/v.mp4"),
            normalizer.key("Movie2: https://x.com/v.mp4")
        );
        assert_eq!(
            normalizer.key("MOVIE: https://x.com/v.mp4"),
            normalizer.key("movie: https://x.com/v.mp4")
        );
    }

    #[test]
    fn test_tracking_strip_configurable() {
        let keep = Normalizer::with_config(NormalizerConfig {
            strip_tracking: false,
            ..NormalizerConfig::default()
        });
        assert_ne!(
            keep.key("https://x.com/p?utm_source=a"),
            keep.key("https://x.com/p?utm_source=b")
        );
    }
}
