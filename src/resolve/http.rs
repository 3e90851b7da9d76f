//! Shared HTTP client for upstream metadata lookups

use reqwest::{Client, RequestBuilder, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::ProviderConfig;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Upstream request timed out")]
    Timeout,

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),

    #[error("Malformed response body: {0}")]
    InvalidBody(String),
}

pub type Result<T> = std::result::Result<T, UpstreamError>;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::from(&ProviderConfig::default())
    }
}

impl From<&ProviderConfig> for HttpConfig {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout.as_duration(),
            request_timeout: config.request_timeout.as_duration(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// JSON-over-HTTP client used by both resolution stages.
///
/// Cheap to clone; clones share one connection pool. No retries: every call
/// is a single round-trip bounded by `request_timeout`.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| UpstreamError::RequestFailed(e.to_string()))?;

        Ok(Self { client })
    }

    /// GET `url` with query parameters and decode a JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        debug!(url, "Upstream GET");
        self.send_json(self.client.get(url).query(query)).await
    }

    /// POST a JSON body to `url` and decode a JSON response
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        debug!(url, "Upstream POST");
        self.send_json(self.client.post(url).json(body)).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            check_json_content_type(content_type)?;
        }

        let bytes = response.bytes().await.map_err(map_transport_error)?;

        debug!(size = bytes.len(), "Upstream response received");

        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::InvalidBody(e.to_string()))
    }
}

fn map_transport_error(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::RequestFailed(e.to_string())
    }
}

/// Accepts `application/json` and `+json` structured suffixes, with any parameters
pub fn check_json_content_type(content_type: &str) -> Result<mime::Mime> {
    let media_type: mime::Mime = content_type
        .parse()
        .map_err(|_| UpstreamError::UnexpectedContentType(content_type.to_string()))?;

    let is_json = media_type.subtype() == mime::JSON || media_type.suffix().is_some_and(|s| s == mime::JSON);

    if media_type.type_() != mime::APPLICATION || !is_json {
        return Err(UpstreamError::UnexpectedContentType(format!(
            "{}/{}",
            media_type.type_(),
            media_type.subtype()
        )));
    }

    Ok(media_type)
}
