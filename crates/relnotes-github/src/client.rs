//! GitHub search API collector
//!
//! Fetches closed pull requests of a milestone through `GET /search/issues`,
//! following `Link: rel="next"` headers until the last page. Pages are
//! concatenated in the order they were fetched.
//!
//! ## Authentication
//!
//! Uses a bearer token, by default from the `GITHUB_TOKEN` environment
//! variable (see `github.token_env`).

use std::time::Duration;

use async_trait::async_trait;
use relnotes_core::config::GitHubConfig;
use relnotes_core::Issue;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, instrument, warn};

use crate::error::{CollectorError, Result};
use crate::search::{build_search_query, next_page_url, parse_repository, SearchResponse};
use crate::source::IssueSource;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = concat!("relnotes/", env!("CARGO_PKG_VERSION"));

/// GitHub search collector
pub struct GitHubSource {
    config: GitHubConfig,
    token: String,
    client: Client,
}

impl std::fmt::Debug for GitHubSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubSource")
            .field("api_url", &self.config.api_url)
            .field("per_page", &self.config.per_page)
            .finish_non_exhaustive()
    }
}

impl GitHubSource {
    /// Create a new collector; a missing or empty token is a configuration error
    pub fn new(config: GitHubConfig, token: Option<String>) -> Result<Self> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| CollectorError::MissingCredential(config.token_env.clone()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            token,
            client,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search/issues", self.config.api_url.trim_end_matches('/'))
    }

    async fn get_page(&self, url: &str, query: Option<&str>) -> Result<Response> {
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(AUTHORIZATION, format!("Bearer {}", self.token));

        if let Some(query) = query {
            request = request.query(&[
                ("q", query.to_string()),
                ("per_page", self.config.per_page.to_string()),
            ]);
        }

        let response = request.send().await?;
        check_status(response).await
    }
}

/// Map error statuses to collector errors
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN && rate_limit_exhausted(response.headers()))
    {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        return Err(CollectorError::RateLimited { retry_after });
    }

    let message = response.text().await.unwrap_or_default();
    Err(CollectorError::ApiError {
        status: status.as_u16(),
        message,
    })
}

fn rate_limit_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get("X-RateLimit-Remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}

#[async_trait]
impl IssueSource for GitHubSource {
    fn name(&self) -> &str {
        "github"
    }

    #[instrument(skip(self))]
    async fn fetch(&self, repository: &str, milestone: &str) -> Result<Vec<Issue>> {
        let (owner, name) = parse_repository(repository)?;
        let query = build_search_query(&format!("{}/{}", owner, name), milestone);
        info!(%query, "looking up pull requests for milestone");

        let mut issues = Vec::new();
        let mut url = self.search_url();
        let mut first = true;
        let mut page = 1usize;

        loop {
            let response = self
                .get_page(&url, first.then_some(query.as_str()))
                .await?;

            let next = match response.headers().get(reqwest::header::LINK) {
                Some(link) => next_page_url(link.to_str().map_err(|e| {
                    CollectorError::InvalidLink(e.to_string())
                })?)?,
                None => None,
            };

            let body: SearchResponse = response.json().await?;
            if body.incomplete_results {
                warn!(page, "search results are incomplete");
            }
            debug!(
                page,
                items = body.items.len(),
                total = body.total_count,
                "fetched search page"
            );

            let empty_page = body.items.is_empty();
            issues.extend(body.items.into_iter().map(Issue::from));

            match next {
                Some(next_url) if !empty_page => {
                    url = next_url;
                    first = false;
                    page += 1;
                }
                _ => break,
            }
        }

        info!(count = issues.len(), pages = page, "pull requests collected");
        Ok(issues)
    }
}
