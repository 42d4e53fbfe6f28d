//! HTTP transport seam for packagecloud requests.
//!
//! The paginated fetcher only needs `GET url -> {status, headers, body}`. The
//! [`HttpClient`] trait captures that contract so tests can substitute a mock
//! while [`ReqwestHttpClient`] performs real blocking requests.

use std::time::Duration;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::StatusCode;
use reqwest::blocking::Client;
use serde_json::Value;
use url::Url;

use super::endpoint::redact;
use super::error::ClientError;

/// Header carrying the authoritative item count of a paged resource.
pub const TOTAL_HEADER: HeaderName = HeaderName::from_static("total");

/// A fully-read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response without headers.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Adds or replaces one header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns a header value when present and valid visible ASCII.
    #[must_use]
    pub fn header_str(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] when the body is not valid JSON.
    pub fn json(&self) -> Result<Value, ClientError> {
        serde_json::from_str(&self.body).map_err(|error| ClientError::Decode {
            message: format!("response body is not JSON: {error}"),
        })
    }
}

/// Minimal blocking HTTP client used by the paginated fetcher.
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Issues a GET request and reads the whole response.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] when the request cannot be sent, the
    /// timeout elapses, or the body cannot be read.
    fn get(&self, url: &Url, timeout: Duration) -> Result<HttpResponse, ClientError>;
}

/// `reqwest`-backed blocking client.
///
/// Credentials embedded in the URL (`scheme://token:@host`) are sent as HTTP
/// basic authentication by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Builds a client with default connection settings.
    ///
    /// Must not be called from within an async runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] when the TLS backend or
    /// connection pool cannot be initialised.
    pub fn new() -> Result<Self, ClientError> {
        let client = Client::builder()
            .build()
            .map_err(|error| ClientError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn get(&self, url: &Url, timeout: Duration) -> Result<HttpResponse, ClientError> {
        let network_error = |error: reqwest::Error| ClientError::Network {
            message: format!("GET {} failed: {}", redact(url), error.without_url()),
        };

        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .map_err(network_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().map_err(network_error)?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
