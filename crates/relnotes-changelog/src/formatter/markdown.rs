//! Markdown changelog formatter

use relnotes_core::OutputConfig;
use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::{AudienceReport, ClassifiedIssue, ClassifiedReport};

/// Markdown changelog formatter
///
/// CLI changes are rendered as level-3 category headings. Library-only
/// changes follow under a single library heading, inside a collapsed
/// `<details>` block with level-4 category headings.
pub struct MarkdownFormatter {
    /// Heading level used for top-level sections
    pub heading_level: usize,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self { heading_level: 3 }
    }

    /// Render a single bullet entry
    pub fn format_entry(&self, entry: &ClassifiedIssue, config: &OutputConfig) -> String {
        let mut line = format!("* {}", entry.issue.title);

        if !entry.tags.is_empty() {
            line.push_str(&format!(" [{}]", entry.tags.join(", ")));
        }

        if config.include_authors {
            line.push_str(&format!(
                " (#{} by @{})",
                entry.issue.number, entry.issue.author
            ));
        } else {
            line.push_str(&format!(" (#{})", entry.issue.number));
        }

        line.push('\n');
        line
    }

    fn format_groups(
        &self,
        output: &mut String,
        report: &AudienceReport,
        level: usize,
        config: &OutputConfig,
    ) {
        let hashes = "#".repeat(level);
        for group in report.non_empty_groups() {
            output.push_str(&format!("{} {}\n\n", hashes, group.title));
            for entry in &group.issues {
                output.push_str(&self.format_entry(entry, config));
            }
            output.push('\n');
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, report, config), fields(cli = report.cli.categorized(), library = report.library.categorized()))]
    fn format(&self, report: &ClassifiedReport, config: &OutputConfig) -> String {
        let mut output = String::new();

        self.format_groups(&mut output, &report.cli, self.heading_level, config);

        if !report.library.is_empty() {
            output.push_str(&format!(
                "{} {}\n\n",
                "#".repeat(self.heading_level),
                config.library.heading
            ));
            output.push_str(&format!(
                "<details><summary>{}</summary><p>\n\n",
                config.library.summary
            ));
            self.format_groups(&mut output, &report.library, self.heading_level + 1, config);
            output.push_str("</p></details>");
        }

        // Blank lines are trimmed; a non-empty document ends with one newline.
        let trimmed = output.trim();
        let output = if trimmed.is_empty() {
            String::new()
        } else {
            format!("{}\n", trimmed)
        };

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use relnotes_core::Issue;

    fn render(issues: Vec<Issue>) -> String {
        let report = Classifier::default().classify(issues);
        MarkdownFormatter::new().format(&report, &OutputConfig::default())
    }

    #[test]
    fn test_single_feature() {
        let output = render(vec![
            Issue::new(10, "Add X", "a").with_label("type/enhancement")
        ]);

        assert!(output.contains("### Features\n\n* Add X (#10 by @a)\n"));
        assert!(!output.contains("Fixes"));
        assert!(!output.contains("Library"));
    }

    #[test]
    fn test_library_feature_goes_in_collapsed_block() {
        let output = render(vec![
            Issue::new(10, "Add X", "a").with_labels(["type/enhancement", "lib"])
        ]);

        assert!(output.starts_with("### Library\n\n<details><summary>"));
        assert!(output.contains("#### Features\n\n* Add X (#10 by @a)\n"));
        assert!(!output.lines().any(|l| l == "### Features"));
        assert!(output.ends_with("</p></details>\n"));
    }

    #[test]
    fn test_multi_categorized_issue_not_rendered() {
        let output = render(vec![
            Issue::new(11, "Both", "a").with_labels(["type/enhancement", "type/bug"])
        ]);

        assert!(output.is_empty());
    }

    #[test]
    fn test_breaking_annotation() {
        let output = render(vec![
            Issue::new(20, "Fix Y", "b").with_labels(["type/bug", "breaking-change"])
        ]);

        assert!(output.contains("* Fix Y [breaking] (#20 by @b)"));
    }

    #[test]
    fn test_both_annotations_in_one_bracket() {
        let output = render(vec![Issue::new(21, "Z", "c").with_labels([
            "type/enhancement",
            "breaking-change",
            "experimental",
        ])]);

        assert!(output.contains("* Z [experimental, breaking] (#21 by @c)"));
    }

    #[test]
    fn test_library_without_categorized_issues_renders_nothing() {
        let report = Classifier::default().classify(vec![
            Issue::new(1, "Bump deps", "a").with_labels(["lib", "type/chore"]),
            Issue::new(2, "Both", "b").with_labels(["lib", "type/bug", "type/enhancement"]),
            Issue::new(3, "Bare", "c").with_label("lib"),
        ]);

        assert_eq!(report.diagnostics.len(), 3);
        assert_eq!(report.library.total, 3);
        assert_eq!(MarkdownFormatter::new().format(&report, &OutputConfig::default()), "");
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert_eq!(render(vec![]), "");
    }

    #[test]
    fn test_full_document() {
        let output = render(vec![
            Issue::new(3, "Fix crash", "x").with_label("type/bug"),
            Issue::new(1, "Add flag", "y").with_label("type/enhancement"),
            Issue::new(2, "Add API", "z").with_labels(["type/enhancement", "lib", "experimental"]),
            Issue::new(4, "Chore", "w").with_label("type/chore"),
        ]);

        let expected = "### Features\n\
                        \n\
                        * Add flag (#1 by @y)\n\
                        \n\
                        ### Fixes\n\
                        \n\
                        * Fix crash (#3 by @x)\n\
                        \n\
                        ### Library\n\
                        \n\
                        <details><summary>Changes that only affect library usage...</summary><p>\n\
                        \n\
                        #### Features\n\
                        \n\
                        * Add API [experimental] (#2 by @z)\n\
                        \n\
                        </p></details>\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_order_matches_input_not_number() {
        let output = render(vec![
            Issue::new(9, "Nine", "a").with_label("type/bug"),
            Issue::new(2, "Two", "a").with_label("type/bug"),
            Issue::new(5, "Five", "a").with_label("type/bug"),
        ]);

        let nine = output.find("#9 ").unwrap();
        let two = output.find("#2 ").unwrap();
        let five = output.find("#5 ").unwrap();
        assert!(nine < two && two < five);
    }

    #[test]
    fn test_without_authors() {
        let report = Classifier::default()
            .classify(vec![Issue::new(10, "Add X", "a").with_label("type/enhancement")]);
        let config = OutputConfig {
            include_authors: false,
            ..OutputConfig::default()
        };

        let output = MarkdownFormatter::new().format(&report, &config);
        assert_eq!(output, "### Features\n\n* Add X (#10)\n");
    }

    #[test]
    fn test_format_is_idempotent() {
        let report = Classifier::default().classify(vec![
            Issue::new(1, "A", "a").with_labels(["type/bug", "lib"]),
            Issue::new(2, "B", "b").with_label("type/enhancement"),
        ]);
        let formatter = MarkdownFormatter::new();
        let config = OutputConfig::default();

        assert_eq!(formatter.format(&report, &config), formatter.format(&report, &config));
    }
}
