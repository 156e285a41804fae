//! Diff calculation between old and new link lists.
//!
//! Builds a key set from the old baseline and walks the new lines in
//! order, dropping any line whose key was already seen in the baseline
//! or earlier in the new file. Surviving lines keep their original text.

use std::collections::HashSet;

use crate::models::{DiffReport, MediaConfig, NormalizerConfig};
use crate::normalize::{Normalizer, extract};

/// Result of a diff run: surviving lines plus summary counters.
#[derive(Debug, Clone, Default)]
pub struct DiffOutcome {
    /// Surviving new lines, original text, first-occurrence order
    pub lines: Vec<String>,
    /// Summary counters
    pub report: DiffReport,
}

impl DiffOutcome {
    /// Check if any lines survived the filter.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Engine computing which new lines survive the old baseline.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    normalizer: Normalizer,
    media: MediaConfig,
}

impl DiffEngine {
    /// Create a diff engine with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a diff engine with custom normalizer and media settings.
    pub fn with_config(normalizer: NormalizerConfig, media: MediaConfig) -> Self {
        Self {
            normalizer: Normalizer::with_config(normalizer),
            media,
        }
    }

    /// Compute the diff between the old baseline and the new lines.
    pub fn run(&self, old_lines: &[String], new_lines: &[String]) -> DiffOutcome {
        let old_keys: HashSet<String> = old_lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(|l| self.normalizer.key(l))
            .collect();

        let mut seen: HashSet<String> = HashSet::new();
        let mut lines: Vec<String> = Vec::new();
        let mut total_new = 0usize;

        for line in new_lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            total_new += 1;

            let key = self.normalizer.key(line);
            if old_keys.contains(&key) || !seen.insert(key) {
                continue;
            }
            lines.push(line.to_string());
        }

        let (video_count, pdf_count) = self.count_media(&lines);
        let report = DiffReport {
            total_old: old_keys.len(),
            total_new,
            kept: lines.len(),
            removed: total_new - lines.len(),
            video_count,
            pdf_count,
        };

        DiffOutcome { lines, report }
    }

    /// Count video and document links among the surviving lines.
    ///
    /// Suffix matching runs on the raw extracted token, not the
    /// normalized key.
    fn count_media(&self, lines: &[String]) -> (usize, usize) {
        let mut videos = 0;
        let mut pdfs = 0;

        for line in lines {
            let token = extract(line).token.to_lowercase();
            if self.media.video_extensions.iter().any(|e| token.ends_with(e.as_str())) {
                videos += 1;
            } else if self
                .media
                .document_extensions
                .iter()
                .any(|e| token.ends_with(e.as_str()))
            {
                pdfs += 1;
            }
        }

        (videos, pdfs)
    }
}

/// Convenience function to diff with the default policy.
pub fn diff(old_lines: &[String], new_lines: &[String]) -> DiffOutcome {
    DiffEngine::new().run(old_lines, new_lines)
}
