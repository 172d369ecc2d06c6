use async_trait::async_trait;
use reqwest::header::LINK;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::client::ActivitySource;
use crate::error::FetchError;
use crate::record::{LANGUAGE_SEPARATOR, NO_LANGUAGES, RepositoryRecord, normalize};

const API_ROOT: &str = "https://api.github.com";

/// Collects activity straight from the GitHub REST API, producing the same
/// records the dashboard backend would serve.
#[derive(Clone)]
pub struct GithubClient {
    username: Arc<String>,
    token: Option<Arc<String>>,
    api_root: Arc<String>,
    http: Arc<Client>,
}

#[derive(Deserialize)]
struct RepoNode {
    name: String,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
}

impl GithubClient {
    /// `timeout` bounds each request to the API, not the whole collection.
    pub fn new(
        username: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent("ghactivity")
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            username: Arc::new(username.into()),
            token: token.map(Arc::new),
            api_root: Arc::new(API_ROOT.to_string()),
            http: Arc::new(http),
        })
    }

    /// Point at a different API root (GitHub Enterprise).
    pub fn with_api_root(mut self, root: impl Into<String>) -> Self {
        self.api_root = Arc::new(root.into().trim_end_matches('/').to_string());
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Low-level GET. Transport failures are errors; any HTTP status is
    /// returned to the caller to decide on.
    async fn get(&self, path: &str) -> Result<reqwest::Response, FetchError> {
        let mut req = self
            .http
            .get(format!("{}{path}", self.api_root))
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            req = req.bearer_auth(token.as_str());
        }

        req.send()
            .await
            .map_err(|e| FetchError::Transport(format!("GitHub request to {path} failed: {e}")))
    }

    /// Owned repositories (first page of 100).
    async fn list_repos(&self) -> Result<Vec<RepoNode>, FetchError> {
        let resp = self
            .get(&format!("/users/{}/repos?per_page=100", self.username))
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(FetchError::Backend(format!(
                "GitHub API error: {}",
                status.as_u16()
            )));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| FetchError::Decode(format!("Failed to parse JSON from GitHub: {e}")))?;

        if !json.is_array() {
            return Err(FetchError::Backend("Unexpected API response format".to_string()));
        }

        serde_json::from_value(json)
            .map_err(|e| FetchError::Decode(format!("Failed to deserialize repository list: {e}")))
    }

    /// Commit count for one repository, using the `rel="last"` page of a
    /// one-commit-per-page listing.
    async fn commit_count(&self, repo: &str) -> Result<u64, FetchError> {
        let resp = self
            .get(&format!("/repos/{}/{repo}/commits?per_page=1", self.username))
            .await?;

        if resp.status() != StatusCode::OK {
            debug!(repo, status = resp.status().as_u16(), "no commit listing");
            return Ok(0);
        }

        let last_page = resp
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(last_page_from_link);

        if let Some(n) = last_page {
            return Ok(n);
        }

        // no pagination: every commit fits on the page
        let body: Value = resp.json().await.unwrap_or(Value::Null);
        Ok(body.as_array().map(|a| a.len() as u64).unwrap_or(0))
    }

    /// Languages in the order GitHub reports them, or the "N/A" sentinel.
    async fn languages(&self, repo: &str) -> Result<String, FetchError> {
        let resp = self
            .get(&format!("/repos/{}/{repo}/languages", self.username))
            .await?;

        if resp.status() != StatusCode::OK {
            return Ok(NO_LANGUAGES.to_string());
        }

        let body: Value = match resp.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!(repo, error = %e, "failed to parse languages");
                return Ok(NO_LANGUAGES.to_string());
            }
        };

        Ok(join_languages(&body))
    }

    /// Build the backend-shaped payload for every owned repository.
    pub async fn collect(&self) -> Result<Value, FetchError> {
        let repos = self.list_repos().await?;
        let mut out = Vec::with_capacity(repos.len());

        for repo in repos {
            let commits = self.commit_count(&repo.name).await?;
            let languages = self.languages(&repo.name).await?;

            out.push(json!({
                "repo": repo.name,
                "commits": commits,
                "languages": languages,
                "stars": repo.stargazers_count,
                "forks": repo.forks_count,
            }));
        }

        Ok(Value::Array(out))
    }
}

#[async_trait]
impl ActivitySource for GithubClient {
    async fn fetch(&self) -> Result<Vec<RepositoryRecord>, FetchError> {
        let payload = self.collect().await?;
        Ok(normalize(&payload))
    }
}

/// Page number of the `rel="last"` entry in a GitHub `Link` header.
pub fn last_page_from_link(link: &str) -> Option<u64> {
    let last = link.split(',').find(|part| part.contains("rel=\"last\""))?;
    let after = last.rsplit("page=").next()?;
    let digits: String = after.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Join the keys of a `/languages` response; empty or non-object is "N/A".
pub fn join_languages(body: &Value) -> String {
    match body.as_object() {
        Some(map) if !map.is_empty() => map
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(LANGUAGE_SEPARATOR),
        _ => NO_LANGUAGES.to_string(),
    }
}
