//! Relnotes Core - Core library for milestone release notes
//!
//! This crate provides the foundational types, error handling and
//! configuration shared by the collector, the changelog generator and the CLI.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, OutputConfig, TaxonomyConfig};
pub use error::{ChangelogError, ConfigError, Result};
pub use types::Issue;
