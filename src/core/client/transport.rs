//! HTTP transport seam
//!
//! The client hands a fully signed request to an [`HttpTransport`] and gets
//! back the raw status line and body. Production uses reqwest; tests swap in
//! a mock to count calls per endpoint.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

use crate::config::HttpConfig;
use crate::core::error::{DuoError, Result};

/// A signed POST ready to send
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: String,
}

/// Status line and body as received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    /// Only populated for 200 and 400; other statuses are never interpreted
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform exactly one HTTP exchange; never retries
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse>;
}

/// reqwest-backed transport; the inner client pools connections and is safe to share
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(crate::USER_AGENT)
            .build()
            .map_err(|e| DuoError::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one shared with the host application
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse> {
        let response = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| map_network_error(&e))?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();
        debug!(status = status.as_u16(), "Duo HTTP response received");

        let body = match status.as_u16() {
            200 | 400 => response.text().await.map_err(|e| map_network_error(&e))?,
            _ => String::new(),
        };

        Ok(RawResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

/// Classify a reqwest failure that happened before a usable response existed
pub fn map_network_error(error: &reqwest::Error) -> DuoError {
    if error.is_timeout() {
        DuoError::timeout(format!("Request to Duo timed out: {}", error))
    } else if error.is_builder() {
        DuoError::configuration(format!("Invalid request: {}", error))
    } else if error.is_connect() {
        DuoError::network(format!("Connection to Duo failed: {}", error))
    } else {
        DuoError::network(format!("Network error: {}", error))
    }
}
