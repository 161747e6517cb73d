//! Core types for relnotes

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A closed pull request considered for release notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Pull request number, unique within a repository
    pub number: u64,
    /// Pull request title
    pub title: String,
    /// Handle of the author (without the leading `@`)
    pub author: String,
    /// Label names attached to the pull request
    #[serde(default)]
    pub labels: BTreeSet<String>,
}

impl Issue {
    /// Create a new issue without labels
    pub fn new(number: u64, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            author: author.into(),
            labels: BTreeSet::new(),
        }
    }

    /// Add a label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    /// Add several labels
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Check whether the issue carries a label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Labels starting with the given prefix, in sorted order
    pub fn labels_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.labels
            .iter()
            .map(String::as_str)
            .filter(move |label| label.starts_with(prefix))
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.number, self.title)
    }
}
