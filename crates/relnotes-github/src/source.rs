//! Issue source abstraction

use std::path::PathBuf;

use async_trait::async_trait;
use relnotes_core::Issue;
use tracing::{debug, info};

use crate::error::{CollectorError, Result};

/// Trait for pull request collectors
///
/// Implementations return every closed pull request of a milestone as one
/// finite, ordered sequence. The order must be stable across runs.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Get the source name
    fn name(&self) -> &str;

    /// Fetch closed pull requests for a repository milestone
    async fn fetch(&self, repository: &str, milestone: &str) -> Result<Vec<Issue>>;
}

/// Reads issues from a JSON array on disk
///
/// Repository and milestone are ignored; the file is taken as the complete
/// set of pull requests for the release.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source for a file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IssueSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    async fn fetch(&self, repository: &str, milestone: &str) -> Result<Vec<Issue>> {
        info!(path = %self.path.display(), repository, milestone, "reading issues from file");

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CollectorError::ReadFailed {
                path: self.path.clone(),
                source,
            })?;
        let issues: Vec<Issue> = serde_json::from_str(&content)?;

        // Issue numbers are positive.
        if let Some(index) = issues.iter().position(|issue| issue.number == 0) {
            return Err(CollectorError::ZeroIssueNumber {
                path: self.path.clone(),
                index,
            });
        }

        debug!(count = issues.len(), "issues loaded");
        Ok(issues)
    }
}
