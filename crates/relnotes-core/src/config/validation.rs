//! Configuration validation

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::{Config, TaxonomyConfig};

static REPOSITORY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*/[A-Za-z0-9._-]+$").expect("Invalid regex")
});

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_repository(config)?;
    validate_github(config)?;
    validate_taxonomy(&config.taxonomy)?;
    validate_output(config)?;
    debug!("configuration validation passed");
    Ok(())
}

/// Check that a repository identifier has the `owner/name` shape
pub fn is_valid_repository(repository: &str) -> bool {
    REPOSITORY_REGEX.is_match(repository)
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn validate_repository(config: &Config) -> Result<()> {
    if let Some(repository) = &config.repository {
        if !is_valid_repository(repository) {
            return Err(invalid("repository", "must be in owner/name form"));
        }
    }

    if config.milestone.as_deref().is_some_and(|m| m.trim().is_empty()) {
        return Err(invalid("milestone", "milestone cannot be empty"));
    }

    Ok(())
}

fn validate_github(config: &Config) -> Result<()> {
    if config.github.api_url.is_empty() {
        return Err(invalid("github.api_url", "API URL cannot be empty"));
    }

    if config.github.token_env.is_empty() {
        return Err(invalid("github.token_env", "token variable name cannot be empty"));
    }

    if !(1..=100).contains(&config.github.per_page) {
        return Err(invalid("github.per_page", "must be between 1 and 100"));
    }

    Ok(())
}

/// Validate a label taxonomy on its own
pub fn validate_taxonomy(taxonomy: &TaxonomyConfig) -> Result<()> {
    if taxonomy.audience_label.is_empty() {
        return Err(invalid("taxonomy.audience_label", "audience label cannot be empty"));
    }

    if taxonomy.type_prefix.is_empty() {
        return Err(invalid("taxonomy.type_prefix", "type prefix cannot be empty"));
    }

    if taxonomy.audience_label.starts_with(&taxonomy.type_prefix) {
        return Err(invalid(
            "taxonomy.audience_label",
            "audience label cannot start with the type prefix",
        ));
    }

    if taxonomy.categories.is_empty() {
        return Err(invalid("taxonomy.categories", "at least one category is required"));
    }

    let mut titles = HashSet::new();
    let mut suffixes = HashSet::new();
    for (i, category) in taxonomy.categories.iter().enumerate() {
        if category.title.is_empty() {
            return Err(invalid(
                format!("taxonomy.categories[{}].title", i),
                "category title cannot be empty",
            ));
        }
        if category.suffix.is_empty() {
            return Err(invalid(
                format!("taxonomy.categories[{}].suffix", i),
                "category suffix cannot be empty",
            ));
        }
        if !titles.insert(category.title.as_str()) {
            return Err(invalid(
                format!("taxonomy.categories[{}].title", i),
                format!("duplicate category title '{}'", category.title),
            ));
        }
        if !suffixes.insert(category.suffix.as_str()) {
            return Err(invalid(
                format!("taxonomy.categories[{}].suffix", i),
                format!("duplicate category suffix '{}'", category.suffix),
            ));
        }
    }

    let mut labels = HashSet::new();
    for (i, annotation) in taxonomy.annotations.iter().enumerate() {
        if annotation.label.is_empty() || annotation.tag.is_empty() {
            return Err(invalid(
                format!("taxonomy.annotations[{}]", i),
                "annotation label and tag cannot be empty",
            ));
        }
        if !labels.insert(annotation.label.as_str()) {
            return Err(invalid(
                format!("taxonomy.annotations[{}].label", i),
                format!("duplicate annotation label '{}'", annotation.label),
            ));
        }
    }

    Ok(())
}

fn validate_output(config: &Config) -> Result<()> {
    if config.output.file.as_os_str().is_empty() {
        return Err(invalid("output.file", "output file cannot be empty"));
    }

    if config.output.library.heading.is_empty() {
        return Err(invalid("output.library.heading", "library heading cannot be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnnotationConfig, CategoryConfig};

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_repository_shape() {
        assert!(is_valid_repository("buildpacks/pack"));
        assert!(is_valid_repository("acme/widgets.rs"));
        assert!(!is_valid_repository("pack"));
        assert!(!is_valid_repository("a/b/c"));
        assert!(!is_valid_repository(""));
    }

    #[test]
    fn test_validate_invalid_repository() {
        let mut config = Config::default();
        config.repository = Some("no-slash".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_per_page_bounds() {
        let mut config = Config::default();
        config.github.per_page = 0;
        assert!(validate_config(&config).is_err());
        config.github.per_page = 101;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_duplicate_category_suffix() {
        let mut taxonomy = TaxonomyConfig::default();
        taxonomy
            .categories
            .push(CategoryConfig::new("Bugfixes", "bug"));
        assert!(validate_taxonomy(&taxonomy).is_err());
    }

    #[test]
    fn test_validate_empty_categories() {
        let mut taxonomy = TaxonomyConfig::default();
        taxonomy.categories.clear();
        assert!(validate_taxonomy(&taxonomy).is_err());
    }

    #[test]
    fn test_validate_duplicate_annotation_label() {
        let mut taxonomy = TaxonomyConfig::default();
        taxonomy
            .annotations
            .push(AnnotationConfig::new("experimental", "exp"));
        assert!(validate_taxonomy(&taxonomy).is_err());
    }

    #[test]
    fn test_validate_audience_label_inside_type_namespace() {
        let mut taxonomy = TaxonomyConfig::default();
        taxonomy.audience_label = "type/lib".to_string();
        assert!(validate_taxonomy(&taxonomy).is_err());
    }
}
