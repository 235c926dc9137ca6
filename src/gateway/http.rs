//! HTTP implementation of the gateway over the service's JSON API.
//!
//! Uses a blocking reqwest client; calls run on dispatcher worker threads,
//! never on the UI thread.

use super::{Gateway, SearchRequest};
use crate::model::{GatewayError, MetricsSnapshot, SearchResponse};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Longest slice of a non-JSON error body carried into an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Gateway talking to `GET {base}/search`, `GET {base}/metrics` and `GET {base}/health`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpGateway {
    /// Build a gateway for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Unreachable` if the HTTP client cannot be built
    /// (for example when no TLS backend can be initialized).
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("osq/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Unreachable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Full URL of an endpoint below the base.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GET an endpoint and return the body of a successful response.
    fn get(&self, path: &str, params: &[(&str, String)]) -> Result<String, GatewayError> {
        let url = self.endpoint(path);
        debug!(url = %url, ?params, "GET");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(body)
    }

    fn transport_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::TimedOut(self.timeout)
        } else {
            GatewayError::Unreachable(err.to_string())
        }
    }
}

impl Gateway for HttpGateway {
    fn search(&self, request: &SearchRequest) -> Result<SearchResponse, GatewayError> {
        let params = [
            ("q", request.query.as_str().to_string()),
            ("offset", request.window.offset().to_string()),
            ("limit", request.window.limit().to_string()),
        ];
        let body = self.get("search", &params)?;
        SearchResponse::from_json(&body)
    }

    fn fetch_metrics(&self) -> Result<MetricsSnapshot, GatewayError> {
        let body = self.get("metrics", &[])?;
        MetricsSnapshot::from_json(&body)
    }

    fn health(&self) -> Result<(), GatewayError> {
        self.get("health", &[]).map(|_| ())
    }
}

/// Error body the service sends with 4xx/5xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Pull a human-readable reason out of an error response body.
///
/// Only the first JSON value is read; the service may append more after it.
fn error_message(body: &str) -> String {
    let mut values = serde_json::Deserializer::from_str(body).into_iter::<ErrorBody>();
    if let Some(Ok(parsed)) = values.next() {
        return parsed.error;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no response body".to_string()
    } else if trimmed.chars().count() > MAX_ERROR_BODY_CHARS {
        let head: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", head)
    } else {
        trimmed.to_string()
    }
}
