// crates/products-client/src/response.rs
// ============================================================================
// Module: API Responses
// Description: Buffered HTTP response handed back to scenarios.
// Purpose: Expose status, headers, and body with contract-aware decoding.
// Dependencies: bytes, products-contract, serde_json
// ============================================================================

//! ## Overview
//! A response is fully buffered before it is returned, so scenarios can read
//! the body more than once: once as text for diagnostics and once through a
//! [`ContractSchema`]. Any status is a valid response; interpreting it is the
//! caller's job.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::Duration;

use bytes::Bytes;
use products_contract::ContractSchema;
use products_contract::HttpStatus;
use products_contract::SchemaError;
use serde::de::DeserializeOwned;
use serde_json::Value;

// ============================================================================
// SECTION: Response
// ============================================================================

/// Buffered HTTP response.
///
/// # Invariants
/// - Header names are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Numeric status code.
    status: u16,
    /// Lowercased header names to values.
    headers: BTreeMap<String, String>,
    /// Raw body bytes.
    body: Bytes,
    /// Time from send to fully buffered body.
    elapsed: Duration,
}

impl ApiResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(
        status: u16,
        headers: BTreeMap<String, String>,
        body: Bytes,
        elapsed: Duration,
    ) -> Self {
        let headers =
            headers.into_iter().map(|(name, value)| (name.to_ascii_lowercase(), value)).collect();
        Self {
            status,
            headers,
            body,
            elapsed,
        }
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the taxonomy entry for the status, when known.
    #[must_use]
    pub const fn http_status(&self) -> Option<HttpStatus> {
        HttpStatus::from_code(self.status)
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns every header.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Returns a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Returns the raw body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns the time taken to receive the response.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Syntax`] when the body is not JSON.
    pub fn json(&self) -> Result<Value, SchemaError> {
        serde_json::from_slice(&self.body).map_err(|err| SchemaError::Syntax(err.to_string()))
    }

    /// Validates the body against `schema` and decodes it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the body is not JSON, violates the shape,
    /// or cannot be decoded.
    pub fn parse<T: DeserializeOwned>(&self, schema: &ContractSchema<T>) -> Result<T, SchemaError> {
        schema.parse_bytes(&self.body)
    }
}
