// crates/products-contract/src/status.rs
// ============================================================================
// Module: Status Taxonomy
// Description: Closed set of HTTP status codes used by contract assertions.
// Purpose: Let scenarios state intent ("expect NOT_FOUND") instead of numbers.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`HttpStatus`] names every status code the Products contract asserts on.
//! Codes outside the taxonomy still classify through [`StatusClass`] so that
//! unexpected responses remain reportable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Status Codes
// ============================================================================

/// HTTP status codes recognized by the Products contract.
///
/// # Invariants
/// - Discriminants equal the numeric status code.
/// - Labels returned by [`HttpStatus::as_str`] are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u16)]
pub enum HttpStatus {
    /// 200 OK.
    Ok = 200,
    /// 201 Created.
    Created = 201,
    /// 204 No Content.
    NoContent = 204,
    /// 400 Bad Request.
    BadRequest = 400,
    /// 401 Unauthorized.
    Unauthorized = 401,
    /// 403 Forbidden.
    Forbidden = 403,
    /// 404 Not Found.
    NotFound = 404,
    /// 405 Method Not Allowed.
    MethodNotAllowed = 405,
    /// 409 Conflict.
    Conflict = 409,
    /// 422 Unprocessable Entity.
    UnprocessableEntity = 422,
    /// 429 Too Many Requests.
    TooManyRequests = 429,
    /// 500 Internal Server Error.
    InternalServerError = 500,
    /// 502 Bad Gateway.
    BadGateway = 502,
    /// 503 Service Unavailable.
    ServiceUnavailable = 503,
}

impl HttpStatus {
    /// Every status in the taxonomy, ordered by code.
    pub const ALL: [Self; 14] = [
        Self::Ok,
        Self::Created,
        Self::NoContent,
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::MethodNotAllowed,
        Self::Conflict,
        Self::UnprocessableEntity,
        Self::TooManyRequests,
        Self::InternalServerError,
        Self::BadGateway,
        Self::ServiceUnavailable,
    ];

    /// Returns the numeric status code.
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Looks up a status by numeric code.
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            200 => Some(Self::Ok),
            201 => Some(Self::Created),
            204 => Some(Self::NoContent),
            400 => Some(Self::BadRequest),
            401 => Some(Self::Unauthorized),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            405 => Some(Self::MethodNotAllowed),
            409 => Some(Self::Conflict),
            422 => Some(Self::UnprocessableEntity),
            429 => Some(Self::TooManyRequests),
            500 => Some(Self::InternalServerError),
            502 => Some(Self::BadGateway),
            503 => Some(Self::ServiceUnavailable),
            _ => None,
        }
    }

    /// Returns the stable symbolic label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Created => "CREATED",
            Self::NoContent => "NO_CONTENT",
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::Conflict => "CONFLICT",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::TooManyRequests => "TOO_MANY_REQUESTS",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::BadGateway => "BAD_GATEWAY",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }

    /// Returns the class of this status.
    #[must_use]
    pub const fn class(self) -> StatusClass {
        StatusClass::of(self.code())
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self.class(), StatusClass::Success)
    }

    /// Returns true for 4xx statuses.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        matches!(self.class(), StatusClass::ClientError)
    }

    /// Returns true for 5xx statuses.
    #[must_use]
    pub const fn is_server_error(self) -> bool {
        matches!(self.class(), StatusClass::ServerError)
    }
}

impl fmt::Display for HttpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.as_str())
    }
}

impl From<HttpStatus> for u16 {
    fn from(status: HttpStatus) -> Self {
        status.code()
    }
}

impl TryFrom<u16> for HttpStatus {
    type Error = u16;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(code)
    }
}

// ============================================================================
// SECTION: Status Classes
// ============================================================================

/// Coarse classification of any numeric status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// 1xx.
    Informational,
    /// 2xx.
    Success,
    /// 3xx.
    Redirection,
    /// 4xx.
    ClientError,
    /// 5xx.
    ServerError,
    /// Outside 100..=599.
    Unknown,
}

impl StatusClass {
    /// Classifies a numeric status code.
    #[must_use]
    pub const fn of(code: u16) -> Self {
        match code {
            100..=199 => Self::Informational,
            200..=299 => Self::Success,
            300..=399 => Self::Redirection,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Returns the stable label for this class.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Success => "success",
            Self::Redirection => "redirection",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
            Self::Unknown => "unknown",
        }
    }
}

/// Renders a raw code with its symbolic label when the taxonomy knows it.
#[must_use]
pub fn describe_code(code: u16) -> String {
    HttpStatus::from_code(code)
        .map_or_else(|| format!("{code} ({})", StatusClass::of(code).as_str()), |s| s.to_string())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
