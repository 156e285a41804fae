//! Conversion report structure.

use serde::{Deserialize, Serialize};

/// Summary counters for a single conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffReport {
    /// Distinct keys in the old baseline
    pub total_old: usize,

    /// Non-empty lines in the new file, before dedup
    pub total_new: usize,

    /// Lines surviving the filter
    pub kept: usize,

    /// Lines dropped as duplicates of the baseline or of earlier new lines
    pub removed: usize,

    /// Surviving lines pointing at a video file
    pub video_count: usize,

    /// Surviving lines pointing at a PDF file
    pub pdf_count: usize,
}

impl DiffReport {
    /// Default summary template, one counter per line.
    pub const DEFAULT_TEMPLATE: &'static str = "Old links: {total_old}\n\
        New links: {total_new}\n\
        Updated links: {kept}\n\
        Removed: {removed}\n\
        Videos: {videos}\n\
        PDFs: {pdfs}";

    /// Format the report for display using a template.
    ///
    /// Supported placeholders:
    /// - `{total_old}`, `{total_new}`, `{kept}`, `{removed}`
    /// - `{videos}`, `{pdfs}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{total_old}", &self.total_old.to_string())
            .replace("{total_new}", &self.total_new.to_string())
            .replace("{kept}", &self.kept.to_string())
            .replace("{removed}", &self.removed.to_string())
            .replace("{videos}", &self.video_count.to_string())
            .replace("{pdfs}", &self.pdf_count.to_string())
    }

    /// Format the report with the default template.
    pub fn summary(&self) -> String {
        self.format(Self::DEFAULT_TEMPLATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> DiffReport {
        DiffReport {
            total_old: 10,
            total_new: 7,
            kept: 4,
            removed: 3,
            video_count: 2,
            pdf_count: 1,
        }
    }

    #[test]
    fn test_format() {
        let report = sample_report();
        let result = report.format("{kept} kept, {removed} removed");
        assert_eq!(result, "4 kept, 3 removed");
    }

    #[test]
    fn test_summary_contains_all_counters() {
        let summary = sample_report().summary();
        assert!(summary.contains("Old links: 10"));
        assert!(summary.contains("New links: 7"));
        assert!(summary.contains("Updated links: 4"));
        assert!(summary.contains("Removed: 3"));
        assert!(summary.contains("Videos: 2"));
        assert!(summary.contains("PDFs: 1"));
    }
}
