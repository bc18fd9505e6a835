//! Mock Transport
//!
//! For testing and demo purposes. Serves canned responses per route and
//! records every request it receives.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::transport::{HttpTransport, TransportResponse};
use crate::error::{MarketDataError, Result};

/// A request seen by the mock
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub route: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of a query parameter, if it was sent
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Mock transport with canned responses
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<String, TransportResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
    unreachable: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every request fails before reaching a server
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Serve `body` with `status` for `route`
    pub fn with_response(mut self, route: &str, status: u16, body: impl Into<String>) -> Self {
        self.responses.insert(route.to_string(), TransportResponse::new(status, body));
        self
    }

    /// Serve a JSON document with status 200 for `route`
    pub fn with_json(self, route: &str, body: &serde_json::Value) -> Self {
        self.with_response(route, 200, body.to_string())
    }

    /// All requests so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests made to `route`
    pub fn count(&self, route: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.route == route)
            .count()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, route: &str, query: &[(&str, String)]) -> Result<TransportResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                route: route.to_string(),
                query: query.iter().map(|(k, v)| ((*k).to_string(), v.clone())).collect(),
            });

        if self.unreachable {
            return Err(MarketDataError::Transport(format!("{route}: connection refused")));
        }

        Ok(self
            .responses
            .get(route)
            .cloned()
            .unwrap_or_else(|| TransportResponse::new(404, "no canned response")))
    }
}
