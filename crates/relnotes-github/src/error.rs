//! Collector error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using CollectorError
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Errors raised while collecting pull requests
#[derive(Debug, Error)]
pub enum CollectorError {
    /// No API token available
    #[error("Missing credential: set {0} or pass --token")]
    MissingCredential(String),

    /// Repository identifier is not `owner/name`
    #[error("Invalid repository '{0}': expected owner/name")]
    InvalidRepository(String),

    /// API error from GitHub
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Rate limited by GitHub
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimited { retry_after: Option<u64> },

    /// Malformed pagination link
    #[error("Invalid pagination link: {0}")]
    InvalidLink(String),

    /// Issues file could not be read
    #[error("Failed to read issues from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Issues file entry with a non-positive number
    #[error("Invalid issue number 0 at index {index} in {path}")]
    ZeroIssueNumber { path: PathBuf, index: usize },

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CollectorError {
    /// Whether this error stems from missing or invalid configuration
    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingCredential(_) | Self::InvalidRepository(_))
    }
}
