//! External node classifier (ENC) client
//!
//! Fetches the facts document for this host with a single HTTP GET. Every
//! failure is returned as an [`EncError`] so the caller can fall back to the
//! cache.

use super::Facts;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Client-wide request timeout
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// Value sent in the `Accept` header; the classifier expects this literal
const ACCEPT_VALUE: &str = "json";

/// Errors that can occur when fetching facts from the classifier
#[derive(Debug, Error)]
pub enum EncError {
    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Request construction, transport failure, or timeout
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not a facts document
    #[error("failed to decode facts from {url} (HTTP {status}): {source}")]
    Decode {
        url: String,
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

/// Client for fetching facts from the classifier
#[derive(Debug, Clone)]
pub struct EncClient {
    /// HTTP client for making requests
    http_client: Client,
}

impl EncClient {
    /// Creates a new EncClient using [`FETCH_TIMEOUT`]
    pub fn new() -> Result<Self, EncError> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    /// Creates a new EncClient with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, EncError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(EncError::Client)?;
        Ok(Self { http_client })
    }

    /// Fetches the facts document at `url`
    ///
    /// The body is decoded whatever the response status; an error page that
    /// is not a facts document fails as [`EncError::Decode`].
    ///
    /// # Returns
    /// * `Ok(Facts)` - The decoded document, not yet enhanced
    /// * `Err(EncError)` - On any request or decode failure
    pub async fn fetch_facts(&self, url: &str) -> Result<Facts, EncError> {
        let request_error = |source| EncError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, ACCEPT_VALUE)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            debug!(url, %status, "classifier returned a non-success status");
        }

        let body = response.text().await.map_err(request_error)?;
        parse_body(url, status, &body)
    }
}

/// Decodes a classifier response body
fn parse_body(url: &str, status: StatusCode, body: &str) -> Result<Facts, EncError> {
    serde_json::from_str(body).map_err(|source| EncError::Decode {
        url: url.to_string(),
        status,
        source,
    })
}
