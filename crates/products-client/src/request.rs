// crates/products-client/src/request.rs
// ============================================================================
// Module: API Requests
// Description: Transport-neutral description of one Products API call.
// Purpose: Let the controller build calls without knowing the HTTP client.
// Dependencies: bytes
// ============================================================================

//! ## Overview
//! An [`ApiRequest`] is a method, a list of path segments below the API base,
//! ordered query pairs, and an optional JSON body. Segments are kept raw here
//! and are percent-encoded by the transport, so a hostile identifier can never
//! introduce extra path components.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use bytes::Bytes;

// ============================================================================
// SECTION: Methods
// ============================================================================

/// HTTP methods used by the Products resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestMethod {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// DELETE.
    Delete,
}

impl RequestMethod {
    /// Returns the wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Request
// ============================================================================

/// One outbound API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: RequestMethod,
    /// Raw path segments below the base URL.
    pub segments: Vec<String>,
    /// Query pairs in send order.
    pub query: Vec<(String, String)>,
    /// Serialized JSON body.
    pub body: Option<Bytes>,
}

impl ApiRequest {
    /// Creates a request with no query and no body.
    #[must_use]
    pub fn new<I, S>(method: RequestMethod, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Replaces the query pairs.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Attaches a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Returns the logical path (`/products/1`), unencoded, for diagnostics.
    #[must_use]
    pub fn display_path(&self) -> String {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            path.push_str(segment);
        }
        if path.is_empty() {
            path.push('/');
        }
        path
    }

    /// Returns the query rendered as `k=v&k=v`, unencoded, for diagnostics.
    #[must_use]
    pub fn display_query(&self) -> String {
        self.query.iter().map(|(key, value)| format!("{key}={value}")).collect::<Vec<_>>().join("&")
    }

    /// Returns the body size in bytes.
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.as_ref().map_or(0, Bytes::len)
    }
}
