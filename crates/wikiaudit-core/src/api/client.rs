//! HTTP client for github.com and the GitHub REST API.
//!
//! A single `GitHubClient` carries the cookie store that holds the signed-in
//! session, so every request after login is made as that user.

use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::repository::wiki_new_url;
use crate::models::{RateLimit, RateLimitResponse, Repository};

use super::pagination::next_link;
use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Repositories requested per listing page (the API maximum).
const REPOS_PER_PAGE: u32 = 100;

/// REST API media type
const GITHUB_JSON: &str = "application/vnd.github+json";

const USER_AGENT: &str = concat!("wikiaudit/", env!("CARGO_PKG_VERSION"));

/// A fetched wiki creation page. Non-2xx statuses are kept so the probe can
/// decide what to do with them.
#[derive(Debug, Clone)]
pub struct WikiPage {
    pub status: StatusCode,
    pub body: String,
}

/// Client for github.com and api.github.com.
/// Clone is cheap - reqwest::Client uses Arc internally, and clones share
/// the cookie store.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    github_url: String,
    api_url: String,
}

impl GitHubClient {
    /// Create a new client from the configured base URLs and timeout
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut builder = Client::builder().cookie_store(true).user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            github_url: config.github_url.trim_end_matches('/').to_string(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Check if response is successful, returning a classified error if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &headers, &body))
        }
    }

    async fn parse_json<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse JSON from {}: {}", url, e)))
    }

    // ===== github.com HTML endpoints =====

    /// Fetch the HTML of the login page
    pub async fn fetch_login_page(&self) -> Result<String, ApiError> {
        let url = format!("{}/login", self.github_url);
        debug!(url = %url, "Fetching login page");

        let response = self.client.get(&url).send().await?;
        let response = Self::check_response(response).await?;
        Ok(response.text().await?)
    }

    /// POST the login form to the session endpoint and return the body of
    /// the page GitHub lands on.
    pub async fn submit_login(&self, form: &[(&str, &str)]) -> Result<String, ApiError> {
        let url = format!("{}/session", self.github_url);
        debug!(url = %url, "Submitting login form");

        let response = self.client.post(&url).form(form).send().await?;
        let response = Self::check_response(response).await?;
        Ok(response.text().await?)
    }

    /// GET `<repo>/wiki/_new`.
    ///
    /// Any status is returned as a `WikiPage`, except a 403 that reports an
    /// exhausted quota.
    pub async fn fetch_wiki_new(&self, repo_url: &str) -> Result<WikiPage, ApiError> {
        let url = wiki_new_url(repo_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN && ApiError::quota_exhausted(response.headers()) {
            return Err(ApiError::QuotaExhausted);
        }

        let body = response.text().await?;
        Ok(WikiPage { status, body })
    }

    // ===== REST API endpoints =====

    /// List every repository owned by `handle`, following `Link` pagination.
    ///
    /// Pages are concatenated in order; entries are not deduplicated.
    pub async fn list_repositories(&self, handle: &str) -> Result<Vec<Repository>, ApiError> {
        let mut url = format!(
            "{}/users/{}/repos?per_page={}&page=1",
            self.api_url, handle, REPOS_PER_PAGE
        );
        let mut repos = Vec::new();
        let mut pages = 0u32;

        loop {
            let response = self
                .client
                .get(&url)
                .header(header::ACCEPT, GITHUB_JSON)
                .send()
                .await?;
            let response = Self::check_response(response).await?;

            let next = response
                .headers()
                .get(header::LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_link);

            let page: Vec<Repository> = Self::parse_json(response, &url).await?;
            pages += 1;
            debug!(account = handle, page = pages, count = page.len(), "Fetched repository page");
            repos.extend(page);

            match next {
                Some(next_url) if next_url != url => url = next_url,
                Some(_) => {
                    warn!(account = handle, url = %url, "Pagination link points at the current page, stopping");
                    break;
                }
                None => break,
            }
        }

        Ok(repos)
    }

    /// Fetch the current core rate-limit status
    pub async fn rate_limit(&self) -> Result<RateLimit, ApiError> {
        let url = format!("{}/rate_limit", self.api_url);
        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, GITHUB_JSON)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        let parsed: RateLimitResponse = Self::parse_json(response, &url).await?;
        Ok(parsed.rate)
    }
}
