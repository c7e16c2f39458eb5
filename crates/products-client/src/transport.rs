// crates/products-client/src/transport.rs
// ============================================================================
// Module: HTTP Transport
// Description: Transport seam and the reqwest-backed implementation.
// Purpose: Execute API requests against a base URL with bounded latency.
// Dependencies: async-trait, bytes, reqwest, thiserror, url
// ============================================================================

//! ## Overview
//! [`HttpTransport`] is the only seam between the controller and the network.
//! [`ReqwestTransport`] binds a base URL, a per-request timeout, and default
//! JSON headers. It never retries: a retry policy belongs to the scenario
//! runner, which can then count attempts honestly.
//!
//! Path segments are percent-encoded one by one, so `/`, `?`, and `#` inside
//! an identifier stay inside its segment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Method;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::request::ApiRequest;
use crate::request::RequestMethod;
use crate::response::ApiResponse;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure to obtain any HTTP response.
///
/// # Invariants
/// - A received response with any status is never a [`TransportError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),
    /// The request exceeded its timeout.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// The base URL or request path could not form a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// The response body could not be read.
    #[error("response body read failed: {0}")]
    Body(String),
    /// Any other client failure.
    #[error("http client error: {0}")]
    Other(String),
}

impl TransportError {
    /// Returns the stable kind label used in audit events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Connect(_) => "connect",
            Self::Timeout(_) => "timeout",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Body(_) => "body",
            Self::Other(_) => "other",
        }
    }
}

// ============================================================================
// SECTION: Transport Trait
// ============================================================================

/// Executes one request and buffers the response.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns the buffered response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] only when no response was obtained.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).execute(request).await
    }
}

// ============================================================================
// SECTION: Reqwest Transport
// ============================================================================

/// User agent sent with every request.
const USER_AGENT: &str = concat!("products-client/", env!("CARGO_PKG_VERSION"));

/// Transport backed by a shared reqwest client.
///
/// # Invariants
/// - `base_url` is absolute `http` or `https`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// API root, e.g. `https://dummyjson.com`.
    base_url: Url,
    /// Configured HTTP client.
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport with JSON default headers and a request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] for a malformed or non-HTTP base
    /// URL and [`TransportError::Other`] when the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::Other(format!("failed to build http client: {err}")))?;
        Self::with_client(base_url, client)
    }

    /// Wraps an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] for a malformed or non-HTTP base
    /// URL.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, TransportError> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            base_url,
            client,
        })
    }

    /// Returns the API root.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves the absolute URL for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] when the base cannot carry a path.
    pub fn resolve(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                TransportError::InvalidUrl(format!("base url cannot be a base: {}", self.base_url))
            })?;
            segments.pop_if_empty();
            segments.extend(request.segments.iter().map(String::as_str));
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.resolve(&request)?;
        let method = match request.method {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
            RequestMethod::Put => Method::PUT,
            RequestMethod::Delete => Method::DELETE,
        };
        let mut builder = self.client.request(method, url.as_str());
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let started = Instant::now();
        let response = builder.send().await.map_err(classify_send_error)?;
        let status = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(|err| TransportError::Body(err.to_string()))?;
        Ok(ApiResponse::new(status, headers, body, started.elapsed()))
    }
}

/// Parses and checks the API root.
fn parse_base_url(base_url: &str) -> Result<Url, TransportError> {
    let url = Url::parse(base_url)
        .map_err(|err| TransportError::InvalidUrl(format!("{base_url}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::InvalidUrl(format!(
            "{base_url}: scheme must be http or https"
        )));
    }
    Ok(url)
}

/// Maps a reqwest send failure onto the transport taxonomy.
fn classify_send_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else if err.is_builder() {
        TransportError::InvalidUrl(err.to_string())
    } else if err.is_body() || err.is_decode() {
        TransportError::Body(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}
