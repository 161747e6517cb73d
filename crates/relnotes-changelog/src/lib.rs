//! Relnotes Changelog - Release notes generation from milestone pull requests
//!
//! This crate classifies pull requests by audience and type label and
//! renders the result as a Markdown document.

pub mod classifier;
pub mod formatter;
pub mod generator;
pub mod types;
pub mod writer;

pub use classifier::Classifier;
pub use formatter::{ChangelogFormatter, MarkdownFormatter};
pub use generator::ChangelogGenerator;
pub use types::{
    Audience, AudienceReport, CategoryGroup, ClassificationSummary, ClassifiedIssue,
    ClassifiedReport, Diagnostic, DiagnosticKind, ReleaseNotes,
};
pub use writer::{write_github_outputs, write_release_notes};
