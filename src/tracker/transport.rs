//! HTTP transport used to reach the collector.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::error::{Result, TrackerError};

/// Default request timeout for collector requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default User-Agent sent when a hit does not override it.
pub const DEFAULT_USER_AGENT: &str = concat!("piwik-tracker/", env!("CARGO_PKG_VERSION"));

/// A GET capability against the collector.
///
/// Implementations are pre-configured with the collector base address and a
/// default User-Agent; the client only supplies a relative path with query
/// and per-hit headers.
#[async_trait]
pub trait Transport: Send + Sync {
    type Response: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn get(
        &self,
        path_and_query: &str,
        headers: HeaderMap,
    ) -> std::result::Result<Self::Response, Self::Error>;
}

/// `reqwest` backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    error_for_status: bool,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(base_url, DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    pub fn with_options(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(TrackerError::transport)?;

        Ok(Self {
            client,
            base_url,
            error_for_status: true,
        })
    }

    /// Return non-2xx responses instead of failing on them.
    pub fn accept_any_status(mut self) -> Self {
        self.error_for_status = false;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    type Response = reqwest::Response;
    type Error = reqwest::Error;

    async fn get(
        &self,
        path_and_query: &str,
        headers: HeaderMap,
    ) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}/{}", self.base_url, path_and_query);
        let response = self.client.get(url).headers(headers).send().await?;

        if self.error_for_status {
            response.error_for_status()
        } else {
            Ok(response)
        }
    }
}

/// Validate a collector base address and strip trailing slashes.
pub(crate) fn normalize_base_url(base_url: &str) -> Result<String> {
    let parsed =
        Url::parse(base_url).map_err(|_| TrackerError::InvalidBaseUrl(base_url.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
        return Err(TrackerError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(base_url.trim_end_matches('/').to_string())
}
