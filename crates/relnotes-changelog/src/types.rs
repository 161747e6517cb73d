//! Changelog types

use std::path::PathBuf;

use relnotes_core::Issue;
use serde::{Deserialize, Serialize};

/// Who a change is relevant to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    /// CLI users (no audience label)
    Cli,
    /// Library consumers only
    Library,
}

impl Audience {
    /// Returns the string representation of the audience
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cli => "cli",
            Self::Library => "library",
        }
    }
}

impl std::fmt::Display for Audience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An issue retained in a category, with its annotation tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedIssue {
    /// The issue itself
    #[serde(flatten)]
    pub issue: Issue,
    /// Annotation tags, in the taxonomy's declared order
    pub tags: Vec<String>,
}

/// The issues of one category, in arrival order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Category title
    pub title: String,
    /// Issues in this category
    pub issues: Vec<ClassifiedIssue>,
}

impl CategoryGroup {
    /// Create a new, empty group
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            issues: Vec::new(),
        }
    }

    /// Append an issue
    pub fn push(&mut self, issue: ClassifiedIssue) {
        self.issues.push(issue);
    }

    /// Check if group is empty
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issue numbers in order
    pub fn numbers(&self) -> Vec<u64> {
        self.issues.iter().map(|c| c.issue.number).collect()
    }
}

/// All categories for one audience
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceReport {
    /// One group per configured category, in configured order
    pub groups: Vec<CategoryGroup>,
    /// Issues that landed in this audience, including dropped ones
    pub total: usize,
}

impl AudienceReport {
    /// Create a report with an empty group for each title
    pub fn with_categories<'a>(titles: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            groups: titles.into_iter().map(CategoryGroup::new).collect(),
            total: 0,
        }
    }

    /// Check whether every group is empty
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(CategoryGroup::is_empty)
    }

    /// Get a group by title
    pub fn group(&self, title: &str) -> Option<&CategoryGroup> {
        self.groups.iter().find(|g| g.title == title)
    }

    /// Non-empty groups in order
    pub fn non_empty_groups(&self) -> impl Iterator<Item = &CategoryGroup> {
        self.groups.iter().filter(|g| !g.is_empty())
    }

    /// Number of categorized issues
    pub fn categorized(&self) -> usize {
        self.groups.iter().map(|g| g.issues.len()).sum()
    }
}

/// Why an issue was left out of every category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// No type label at all
    Uncategorized,
    /// More than one type label
    MultiCategorized,
    /// A single type label that maps to no configured category
    UnknownCategory,
}

impl DiagnosticKind {
    /// Returns the string representation of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uncategorized => "uncategorized",
            Self::MultiCategorized => "multi-categorized",
            Self::UnknownCategory => "unknown-category",
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classification anomaly for a single issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What went wrong
    pub kind: DiagnosticKind,
    /// Issue number
    pub number: u64,
    /// Bucket the issue was partitioned into
    pub audience: Audience,
    /// The issue's type labels, sorted
    pub type_labels: Vec<String>,
    /// Annotation tags the issue would have carried
    pub tags: Vec<String>,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            DiagnosticKind::Uncategorized => {
                write!(f, "issue #{} doesn't have a type label", self.number)
            }
            DiagnosticKind::MultiCategorized => write!(
                f,
                "issue #{} has more than one type label: {}",
                self.number,
                self.type_labels.join(", ")
            ),
            DiagnosticKind::UnknownCategory => write!(
                f,
                "issue #{} has type label {} which matches no category",
                self.number,
                self.type_labels.join(", ")
            ),
        }
    }
}

/// Counts reported to the operator after classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    /// Issues in the CLI bucket
    pub cli_total: usize,
    /// Issues in the library bucket
    pub library_total: usize,
    /// Issues placed in a category
    pub categorized: usize,
    /// Issues without a type label
    pub uncategorized: usize,
    /// Issues with several type labels
    pub multi_categorized: usize,
    /// Issues whose type label matches no category
    pub unknown_category: usize,
}

impl ClassificationSummary {
    /// Total number of issues seen
    pub fn total(&self) -> usize {
        self.cli_total + self.library_total
    }

    /// Number of issues left out of every category
    pub fn dropped(&self) -> usize {
        self.uncategorized + self.multi_categorized + self.unknown_category
    }
}

/// The classifier's output: two audience buckets plus diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedReport {
    /// CLI-facing changes
    pub cli: AudienceReport,
    /// Library-only changes
    pub library: AudienceReport,
    /// Anomalies found while classifying
    pub diagnostics: Vec<Diagnostic>,
}

impl ClassifiedReport {
    /// Check if no issue was categorized
    pub fn is_empty(&self) -> bool {
        self.cli.is_empty() && self.library.is_empty()
    }

    /// Diagnostics of one kind
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// Summarize counts
    pub fn summary(&self) -> ClassificationSummary {
        ClassificationSummary {
            cli_total: self.cli.total,
            library_total: self.library.total,
            categorized: self.cli.categorized() + self.library.categorized(),
            uncategorized: self.diagnostics_of(DiagnosticKind::Uncategorized).count(),
            multi_categorized: self.diagnostics_of(DiagnosticKind::MultiCategorized).count(),
            unknown_category: self.diagnostics_of(DiagnosticKind::UnknownCategory).count(),
        }
    }
}

/// Generated release notes, ready to be surfaced or written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseNotes {
    /// Rendered Markdown document
    pub contents: String,
    /// Suggested file name
    pub file: PathBuf,
    /// Classification counts
    pub summary: ClassificationSummary,
    /// Classification anomalies
    pub diagnostics: Vec<Diagnostic>,
}

impl ReleaseNotes {
    /// Named outputs for host tooling (`contents` and `file`)
    pub fn outputs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("contents", self.contents.clone()),
            ("file", self.file.to_string_lossy().into_owned()),
        ]
    }

    /// Check if the document has no content
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
