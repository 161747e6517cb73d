//! Release notes generation

use relnotes_core::{Issue, OutputConfig, TaxonomyConfig};
use tracing::{debug, info, instrument};

use crate::classifier::Classifier;
use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::types::{ClassifiedReport, ReleaseNotes};

/// Release notes generator: classify, then render
pub struct ChangelogGenerator {
    classifier: Classifier,
    formatter: Box<dyn ChangelogFormatter>,
    config: OutputConfig,
}

impl ChangelogGenerator {
    /// Create a new generator with the markdown formatter
    pub fn new(taxonomy: TaxonomyConfig, config: OutputConfig) -> Self {
        Self {
            classifier: Classifier::new(taxonomy),
            formatter: Box::new(MarkdownFormatter::new()),
            config,
        }
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Classify issues into the two-audience report
    pub fn classify(&self, issues: &[Issue]) -> ClassifiedReport {
        self.classifier.classify(issues.iter().cloned())
    }

    /// Render a classified report to a document
    pub fn render(&self, report: &ClassifiedReport) -> String {
        self.formatter.format(report, &self.config)
    }

    /// Classify and render in one step
    #[instrument(skip(self, issues), fields(issue_count = issues.len()))]
    pub fn generate(&self, issues: &[Issue]) -> ReleaseNotes {
        info!(issue_count = issues.len(), "generating release notes");

        let report = self.classify(issues);
        let contents = self.render(&report);
        let summary = report.summary();

        debug!(
            output_len = contents.len(),
            categorized = summary.categorized,
            dropped = summary.dropped(),
            "release notes generated"
        );

        ReleaseNotes {
            contents,
            file: self.config.file.clone(),
            summary,
            diagnostics: report.diagnostics,
        }
    }
}

impl Default for ChangelogGenerator {
    fn default() -> Self {
        Self::new(TaxonomyConfig::default(), OutputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiagnosticKind;
    use std::path::PathBuf;

    #[test]
    fn test_generate_release_notes() {
        let generator = ChangelogGenerator::default();
        let issues = vec![
            Issue::new(10, "Add X", "a").with_label("type/enhancement"),
            Issue::new(11, "Ambiguous", "a").with_labels(["type/enhancement", "type/bug"]),
            Issue::new(12, "Unlabeled", "a"),
        ];

        let notes = generator.generate(&issues);

        assert_eq!(notes.contents, "### Features\n\n* Add X (#10 by @a)\n");
        assert_eq!(notes.file, PathBuf::from("changelog.md"));
        assert_eq!(notes.summary.total(), 3);
        assert_eq!(notes.summary.categorized, 1);
        assert_eq!(notes.summary.multi_categorized, 1);
        assert_eq!(notes.summary.uncategorized, 1);
        assert_eq!(notes.diagnostics[0].kind, DiagnosticKind::MultiCategorized);
        assert_eq!(notes.diagnostics[0].number, 11);
    }

    #[test]
    fn test_generate_empty() {
        let notes = ChangelogGenerator::default().generate(&[]);
        assert!(notes.is_empty());
        assert!(notes.diagnostics.is_empty());
    }

    #[test]
    fn test_custom_file_name() {
        let config = OutputConfig {
            file: PathBuf::from("RELEASE_NOTES.md"),
            ..OutputConfig::default()
        };
        let generator = ChangelogGenerator::new(TaxonomyConfig::default(), config);
        assert_eq!(generator.generate(&[]).file, PathBuf::from("RELEASE_NOTES.md"));
    }

    #[test]
    fn test_custom_formatter() {
        struct Counting;

        impl ChangelogFormatter for Counting {
            fn format(&self, report: &ClassifiedReport, _config: &OutputConfig) -> String {
                report.summary().categorized.to_string()
            }
        }

        let generator = ChangelogGenerator::default().with_formatter(Counting);
        let notes = generator.generate(&[Issue::new(1, "A", "a").with_label("type/bug")]);
        assert_eq!(notes.contents, "1");
    }
}
