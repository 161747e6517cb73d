//! Relnotes GitHub - Pull request collection
//!
//! Provides the [`IssueSource`] abstraction and its implementations:
//! - [`GitHubSource`] searches closed pull requests of a milestone through
//!   the GitHub REST API, following pagination links
//! - [`JsonFileSource`] reads already-collected issues from a JSON file
//!
//! ## Usage
//!
//! ```ignore
//! use relnotes_github::{GitHubSource, IssueSource};
//!
//! let source = GitHubSource::new(config, token)?;
//! let issues = source.fetch("buildpacks/pack", "0.30.0").await?;
//! ```

pub mod client;
pub mod error;
pub mod search;
pub mod source;

pub use client::GitHubSource;
pub use error::{CollectorError, Result};
pub use search::{build_search_query, next_page_url, parse_repository};
pub use source::{IssueSource, JsonFileSource};
