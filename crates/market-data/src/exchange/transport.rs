//! HTTP Transport
//!
//! Plain GET with query parameters against one base URL. Kept behind a trait
//! so the client can be exercised without a network.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;

/// Status and body of a completed request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `route` (relative to the base URL) with the given query
    async fn get(&self, route: &str, query: &[(&str, String)]) -> Result<TransportResponse>;
}

/// reqwest-backed transport
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url: String = base_url.into();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ticker-chat/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, route: &str, query: &[(&str, String)]) -> Result<TransportResponse> {
        let url = format!("{}{}", self.base_url, route);
        debug!(%url, ?query, "GET");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}
