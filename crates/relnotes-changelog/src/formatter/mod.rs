//! Changelog formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use relnotes_core::OutputConfig;

use crate::types::ClassifiedReport;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format a classified report to string
    fn format(&self, report: &ClassifiedReport, config: &OutputConfig) -> String;
}
