//! Issue classification
//!
//! Splits issues into CLI and library buckets by the audience label, then
//! sorts each bucket into categories by its single type label. Issues with
//! no type label, several type labels or an unknown type label are left out
//! of every category and reported as [`Diagnostic`]s instead.

use relnotes_core::{Issue, TaxonomyConfig};
use tracing::{debug, info, instrument};

use crate::types::{
    Audience, AudienceReport, ClassifiedIssue, ClassifiedReport, Diagnostic, DiagnosticKind,
};

/// Classifies issues against a label taxonomy
#[derive(Debug, Clone)]
pub struct Classifier {
    taxonomy: TaxonomyConfig,
}

impl Classifier {
    /// Create a new classifier for a taxonomy
    pub fn new(taxonomy: TaxonomyConfig) -> Self {
        Self { taxonomy }
    }

    /// Which bucket an issue belongs to
    pub fn audience_of(&self, issue: &Issue) -> Audience {
        if issue.has_label(&self.taxonomy.audience_label) {
            Audience::Library
        } else {
            Audience::Cli
        }
    }

    /// Annotation tags for an issue, in the taxonomy's declared order
    pub fn annotations_of(&self, issue: &Issue) -> Vec<String> {
        self.taxonomy
            .annotations
            .iter()
            .filter(|a| issue.has_label(&a.label))
            .map(|a| a.tag.clone())
            .collect()
    }

    /// Classify issues, keeping their arrival order within each category
    #[instrument(skip(self, issues))]
    pub fn classify<I>(&self, issues: I) -> ClassifiedReport
    where
        I: IntoIterator<Item = Issue>,
    {
        let titles = || self.taxonomy.category_titles();
        let mut report = ClassifiedReport {
            cli: AudienceReport::with_categories(titles()),
            library: AudienceReport::with_categories(titles()),
            diagnostics: Vec::new(),
        };

        for issue in issues {
            let audience = self.audience_of(&issue);
            let tags = self.annotations_of(&issue);
            let type_labels: Vec<String> = issue
                .labels_with_prefix(&self.taxonomy.type_prefix)
                .map(str::to_string)
                .collect();

            let bucket = match audience {
                Audience::Cli => &mut report.cli,
                Audience::Library => &mut report.library,
            };
            bucket.total += 1;

            let kind = match type_labels.as_slice() {
                [] => DiagnosticKind::Uncategorized,
                [label] => match self.taxonomy.category_for_label(label) {
                    Some(category) => {
                        // Groups mirror the taxonomy's categories one-to-one.
                        if let Some(group) =
                            bucket.groups.iter_mut().find(|g| g.title == category.title)
                        {
                            group.push(ClassifiedIssue { issue, tags });
                        }
                        continue;
                    }
                    None => DiagnosticKind::UnknownCategory,
                },
                _ => DiagnosticKind::MultiCategorized,
            };

            let diagnostic = Diagnostic {
                kind,
                number: issue.number,
                audience,
                type_labels,
                tags,
            };
            match kind {
                DiagnosticKind::UnknownCategory => {
                    debug!(number = issue.number, %audience, labels = ?diagnostic.type_labels, "issue type has no category")
                }
                // Console reporting belongs to the caller.
                _ => {
                    info!(number = issue.number, %audience, kind = %kind, labels = ?diagnostic.type_labels, "{}", diagnostic)
                }
            }
            report.diagnostics.push(diagnostic);
        }

        debug!(
            cli = report.cli.total,
            library = report.library.total,
            diagnostics = report.diagnostics.len(),
            "issues classified"
        );

        report
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(TaxonomyConfig::default())
    }
}
