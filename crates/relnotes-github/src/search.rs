//! GitHub issue search: query building, response types and pagination links

use std::sync::LazyLock;

use relnotes_core::config::is_valid_repository;
use relnotes_core::Issue;
use regex::Regex;
use serde::Deserialize;

use crate::error::{CollectorError, Result};

static LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<([^>]*)>\s*;\s*rel="([^"]+)""#).expect("Invalid regex"));

/// Login used by GitHub for deleted accounts
pub const GHOST_USER: &str = "ghost";

/// Search API response page
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    /// Total number of matches across all pages
    pub total_count: u64,
    /// Whether the search timed out before finding all matches
    #[serde(default)]
    pub incomplete_results: bool,
    /// Matches on this page
    pub items: Vec<SearchItem>,
}

/// A single search match
#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    number: u64,
    title: String,
    user: Option<SearchUser>,
    #[serde(default)]
    labels: Vec<SearchLabel>,
}

#[derive(Debug, Deserialize)]
struct SearchUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct SearchLabel {
    name: String,
}

impl From<SearchItem> for Issue {
    fn from(item: SearchItem) -> Self {
        let author = item
            .user
            .map(|u| u.login)
            .unwrap_or_else(|| GHOST_USER.to_string());
        Issue::new(item.number, item.title, author)
            .with_labels(item.labels.into_iter().map(|l| l.name))
    }
}

/// Split and validate an `owner/name` repository identifier
pub fn parse_repository(repository: &str) -> Result<(String, String)> {
    let repository = repository.trim();
    if !is_valid_repository(repository) {
        return Err(CollectorError::InvalidRepository(repository.to_string()));
    }

    match repository.split_once('/') {
        Some((owner, name)) => Ok((owner.to_string(), name.to_string())),
        None => Err(CollectorError::InvalidRepository(repository.to_string())),
    }
}

/// Build the search query for closed pull requests of a milestone
///
/// Milestones containing whitespace are quoted.
pub fn build_search_query(repository: &str, milestone: &str) -> String {
    let milestone = milestone.trim();
    let milestone = if milestone.chars().any(char::is_whitespace) {
        format!("\"{}\"", milestone.replace('"', ""))
    } else {
        milestone.to_string()
    };

    format!(
        "repo:{} is:pr state:closed milestone:{}",
        repository.trim(),
        milestone
    )
}

/// Extract the `rel="next"` target from a `Link` header
///
/// Returns `Ok(None)` when there is no next page.
pub fn next_page_url(link_header: &str) -> Result<Option<String>> {
    for part in link_header.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let captures = LINK_REGEX
            .captures(part)
            .ok_or_else(|| CollectorError::InvalidLink(part.to_string()))?;

        if captures[2].split_whitespace().any(|rel| rel == "next") {
            let url = captures[1].to_string();
            if url.is_empty() {
                return Err(CollectorError::InvalidLink(part.to_string()));
            }
            return Ok(Some(url));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repository() {
        let (owner, name) = parse_repository("buildpacks/pack").unwrap();
        assert_eq!(owner, "buildpacks");
        assert_eq!(name, "pack");
    }

    #[test]
    fn test_parse_repository_invalid() {
        assert!(matches!(
            parse_repository("pack"),
            Err(CollectorError::InvalidRepository(_))
        ));
        assert!(parse_repository("").is_err());
        assert!(parse_repository("a/b/c").is_err());
    }

    #[test]
    fn test_build_search_query() {
        assert_eq!(
            build_search_query("buildpacks/pack", "0.30.0"),
            "repo:buildpacks/pack is:pr state:closed milestone:0.30.0"
        );
    }

    #[test]
    fn test_build_search_query_quotes_spaces() {
        assert_eq!(
            build_search_query("acme/widgets", "Sprint 4"),
            "repo:acme/widgets is:pr state:closed milestone:\"Sprint 4\""
        );
    }

    #[test]
    fn test_next_page_url() {
        let header = r#"<https://api.github.com/search/issues?q=x&page=2>; rel="next", <https://api.github.com/search/issues?q=x&page=5>; rel="last""#;
        assert_eq!(
            next_page_url(header).unwrap().as_deref(),
            Some("https://api.github.com/search/issues?q=x&page=2")
        );
    }

    #[test]
    fn test_next_page_url_last_page() {
        let header = r#"<https://api.github.com/search/issues?q=x&page=1>; rel="first", <https://api.github.com/search/issues?q=x&page=4>; rel="prev""#;
        assert_eq!(next_page_url(header).unwrap(), None);
    }

    #[test]
    fn test_next_page_url_malformed() {
        assert!(next_page_url("garbage").is_err());
    }

    #[test]
    fn test_search_item_into_issue() {
        let item: SearchItem = serde_json::from_str(
            r#"{
                "number": 12,
                "title": "Add X",
                "user": {"login": "octocat"},
                "labels": [{"name": "type/enhancement"}, {"name": "lib"}],
                "pull_request": {"url": "https://example.invalid"}
            }"#,
        )
        .unwrap();

        let issue = Issue::from(item);
        assert_eq!(issue.number, 12);
        assert_eq!(issue.author, "octocat");
        assert!(issue.has_label("lib"));
        assert!(issue.has_label("type/enhancement"));
    }

    #[test]
    fn test_search_item_without_user() {
        let item: SearchItem =
            serde_json::from_str(r#"{"number": 3, "title": "Old", "user": null}"#).unwrap();
        assert_eq!(Issue::from(item).author, GHOST_USER);
    }
}
