//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main relnotes configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository in `owner/name` form
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Milestone to collect pull requests for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,

    /// GitHub API configuration
    pub github: GitHubConfig,

    /// Label taxonomy used to classify pull requests
    pub taxonomy: TaxonomyConfig,

    /// Rendered document configuration
    pub output: OutputConfig,
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API
    pub api_url: String,

    /// Environment variable holding the API token
    pub token_env: String,

    /// Results requested per search page (GitHub caps this at 100)
    pub per_page: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            per_page: 100,
            timeout_secs: 30,
        }
    }
}

/// Label taxonomy: which labels decide audience, category and annotations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// Label marking a change as library-only
    pub audience_label: String,

    /// Prefix shared by all type labels (e.g. `type/`)
    pub type_prefix: String,

    /// Categories in heading order
    pub categories: Vec<CategoryConfig>,

    /// Annotation labels in tag order
    pub annotations: Vec<AnnotationConfig>,
}

impl TaxonomyConfig {
    /// Full label name for a category (prefix + suffix)
    pub fn type_label(&self, category: &CategoryConfig) -> String {
        format!("{}{}", self.type_prefix, category.suffix)
    }

    /// Find the category whose full type label matches `label`
    pub fn category_for_label(&self, label: &str) -> Option<&CategoryConfig> {
        let suffix = label.strip_prefix(self.type_prefix.as_str())?;
        self.categories.iter().find(|c| c.suffix == suffix)
    }

    /// Category titles in declared order
    pub fn category_titles(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.title.as_str())
    }
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            audience_label: "lib".to_string(),
            type_prefix: "type/".to_string(),
            categories: vec![
                CategoryConfig::new("Features", "enhancement"),
                CategoryConfig::new("Fixes", "bug"),
            ],
            annotations: vec![
                AnnotationConfig::new("experimental", "experimental"),
                AnnotationConfig::new("breaking-change", "breaking"),
            ],
        }
    }
}

/// A change category derived from a type label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Heading title (e.g. "Features")
    pub title: String,
    /// Type label suffix (e.g. "enhancement" for `type/enhancement`)
    pub suffix: String,
}

impl CategoryConfig {
    /// Create a new category
    pub fn new(title: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            suffix: suffix.into(),
        }
    }
}

/// An annotation label and the tag it renders as
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// Label name on the pull request
    pub label: String,
    /// Short tag shown next to the entry
    pub tag: String,
}

impl AnnotationConfig {
    /// Create a new annotation mapping
    pub fn new(label: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tag: tag.into(),
        }
    }
}

/// Rendered document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Suggested file name for the document
    pub file: PathBuf,

    /// Whether entries credit the author (`by @handle`)
    pub include_authors: bool,

    /// Library section configuration
    pub library: LibrarySectionConfig,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("changelog.md"),
            include_authors: true,
            library: LibrarySectionConfig::default(),
        }
    }
}

/// Collapsible section holding library-only changes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySectionConfig {
    /// Heading above the collapsed block
    pub heading: String,

    /// Summary line shown on the collapsed block
    pub summary: String,
}

impl Default for LibrarySectionConfig {
    fn default() -> Self {
        Self {
            heading: "Library".to_string(),
            summary: "Changes that only affect library usage...".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy() {
        let taxonomy = TaxonomyConfig::default();
        let titles: Vec<&str> = taxonomy.category_titles().collect();
        assert_eq!(titles, vec!["Features", "Fixes"]);
        assert_eq!(taxonomy.type_label(&taxonomy.categories[1]), "type/bug");
    }

    #[test]
    fn test_category_for_label() {
        let taxonomy = TaxonomyConfig::default();
        assert_eq!(
            taxonomy.category_for_label("type/enhancement").map(|c| c.title.as_str()),
            Some("Features")
        );
        assert!(taxonomy.category_for_label("type/chore").is_none());
        assert!(taxonomy.category_for_label("enhancement").is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str("milestone: \"0.30.0\"\n").unwrap();
        assert_eq!(config.milestone.as_deref(), Some("0.30.0"));
        assert_eq!(config.taxonomy.audience_label, "lib");
        assert_eq!(config.output.file, PathBuf::from("changelog.md"));
        assert_eq!(config.github.per_page, 100);
    }
}
