use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::error::FetchError;
use crate::record::{RepositoryRecord, normalize};

/// Anything that can produce the full repository collection in one go.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RepositoryRecord>, FetchError>;
}

/// Client for the dashboard backend's `GET /api/github-activity`.
#[derive(Clone)]
pub struct ActivityClient {
    url: String,
    http: Client,
}

impl ActivityClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent("ghactivity")
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            url: config.activity_url(),
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ActivitySource for ActivityClient {
    async fn fetch(&self) -> Result<Vec<RepositoryRecord>, FetchError> {
        debug!(url = %self.url, "requesting activity");

        let resp = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        parse_body(&body)
    }
}

/// Interpret a successful response body: a record array, or a backend
/// `{ "error": ... }` object.
pub fn parse_body(body: &str) -> Result<Vec<RepositoryRecord>, FetchError> {
    let json: Value = serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if let Some(message) = json.get("error") {
        let message = match message {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(FetchError::Backend(message));
    }

    if !json.is_array() {
        return Err(FetchError::Decode("expected a list of repositories".to_string()));
    }

    Ok(normalize(&json))
}
