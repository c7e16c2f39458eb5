// crates/products-client/src/id.rs
// ============================================================================
// Module: Product Identifiers
// Description: Loosely typed identifier accepted by lookup and write calls.
// Purpose: Allow negative scenarios to send zero, negative, or non-numeric ids.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The remote API types identifiers as positive integers, but the harness has
//! to be able to send anything. [`ProductId`] keeps the numeric case typed and
//! carries every other form verbatim; no validation happens client-side.

use std::fmt;

/// Identifier sent in the `/products/{id}` path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductId {
    /// Integer identifier, including zero and negatives.
    Numeric(i64),
    /// Any other text, passed through unchanged.
    Raw(String),
}

impl ProductId {
    /// Returns the positive numeric value when this is a well-formed id.
    #[must_use]
    pub fn as_positive(&self) -> Option<u64> {
        match self {
            Self::Numeric(value) => u64::try_from(*value).ok().filter(|v| *v > 0),
            Self::Raw(text) => text.parse::<u64>().ok().filter(|v| *v > 0),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self::Numeric(value)
    }
}

impl From<i32> for ProductId {
    fn from(value: i32) -> Self {
        Self::Numeric(i64::from(value))
    }
}

impl From<u32> for ProductId {
    fn from(value: u32) -> Self {
        Self::Numeric(i64::from(value))
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Raw(value.to_string()), Self::Numeric)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}
