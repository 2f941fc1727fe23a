use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::UpstreamConfig;

/// Body of every POST sent to the GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Value,
}

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The endpoint answered with something other than 200.
    #[error("upstream responded with HTTP {0}")]
    Status(u16),

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream unreachable: {0}")]
    Transport(String),

    /// A 200 whose body is not `{"data": {"Page": {"media": [...]}}}`.
    #[error("unexpected upstream payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Sends one GraphQL page query and hands back the `media` entries verbatim.
#[async_trait::async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn fetch_media_page(&self, request: &GraphQlRequest) -> Result<Vec<Value>, UpstreamError>;
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<Data>,
}

#[derive(Deserialize)]
struct Data {
    #[serde(rename = "Page")]
    page: Option<Page>,
}

#[derive(Deserialize)]
struct Page {
    media: Option<Vec<Value>>,
}

#[derive(Clone)]
pub struct AnilistClient {
    client: Client,
    endpoint: String,
}

impl AnilistClient {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build AniList HTTP client: {e}"))?;

        Ok(Self::with_client(client, &config.api_url))
    }

    #[must_use]
    pub fn with_client(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl GraphQlTransport for AnilistClient {
    async fn fetch_media_page(&self, request: &GraphQlRequest) -> Result<Vec<Value>, UpstreamError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "AniList request rejected");
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body: GraphQlResponse = response.json().await?;

        let media = body
            .data
            .and_then(|d| d.page)
            .and_then(|p| p.media)
            .ok_or_else(|| UpstreamError::Decode("missing data.Page.media".to_string()))?;

        debug!(count = media.len(), "AniList page received");
        Ok(media)
    }
}
