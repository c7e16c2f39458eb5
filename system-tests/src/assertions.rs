// system-tests/src/assertions.rs
// ============================================================================
// Module: Scenario Assertions
// Description: Status, shape, and postcondition checks for scenario bodies.
// Purpose: Turn raw responses into typed data or a classified failure.
// Dependencies: products-client, products-contract, thiserror
// ============================================================================

//! ## Overview
//! Every scenario follows the same pattern: assert the status against the
//! taxonomy, validate the body against a contract schema, then check domain
//! postconditions. Each helper here returns a [`ScenarioError`] carrying the
//! expected and actual values so a failing test prints a readable diff.
//!
//! [`ScenarioError::Infrastructure`] is reserved for calls that produced no
//! response at all, so a dead network never reads as a contract violation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Debug;
use std::time::Duration;

use products_client::ApiResponse;
use products_client::ControllerError;
use products_client::SortOrder;
use products_contract::ContractSchema;
use products_contract::ErrorResponse;
use products_contract::HttpStatus;
use products_contract::Product;
use products_contract::SchemaError;
use products_contract::schemas;
use products_contract::shape::IDENTIFIER_FIELD;
use products_contract::status::describe_code;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum number of body characters echoed in a status mismatch.
pub const BODY_EXCERPT_CHARS: usize = 512;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Why a scenario failed.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// No response was obtained from the remote API.
    #[error("infrastructure failure: {0}")]
    Infrastructure(#[from] ControllerError),
    /// The response status differs from the expected one.
    #[error("expected status {expected}, found {}: {body}", describe_code(*.actual))]
    StatusMismatch {
        /// Expected status.
        expected: HttpStatus,
        /// Observed status code.
        actual: u16,
        /// Leading excerpt of the response body.
        body: String,
    },
    /// The body violates its contract schema.
    #[error(transparent)]
    Shape(#[from] SchemaError),
    /// A domain postcondition does not hold.
    #[error("postcondition failed: {0}")]
    Postcondition(String),
    /// The scenario exceeded its wall-clock budget.
    #[error("scenario timed out after {0:?}")]
    TimedOut(Duration),
}

impl ScenarioError {
    /// Returns true when the failure is environmental rather than a contract
    /// violation.
    #[must_use]
    pub const fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Infrastructure(_) | Self::TimedOut(_))
    }

    /// Returns a stable classification label.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Infrastructure(_) => "infrastructure",
            Self::StatusMismatch {
                ..
            } => "status_mismatch",
            Self::Shape(_) => "shape",
            Self::Postcondition(_) => "postcondition",
            Self::TimedOut(_) => "timed_out",
        }
    }
}

/// Builds a [`ScenarioError::Postcondition`] from a format string.
#[macro_export]
macro_rules! postcondition {
    ($($arg:tt)*) => {
        $crate::assertions::ScenarioError::Postcondition(format!($($arg)*))
    };
}

// ============================================================================
// SECTION: Status And Shape
// ============================================================================

/// Asserts the response status.
///
/// # Errors
///
/// Returns [`ScenarioError::StatusMismatch`] when the status differs.
pub fn expect_status(response: &ApiResponse, expected: HttpStatus) -> Result<(), ScenarioError> {
    if response.status() == expected.code() {
        return Ok(());
    }
    Err(ScenarioError::StatusMismatch {
        expected,
        actual: response.status(),
        body: response.text().chars().take(BODY_EXCERPT_CHARS).collect(),
    })
}

/// Asserts `expected` and decodes the body through `schema`.
///
/// # Errors
///
/// Returns [`ScenarioError::StatusMismatch`] or [`ScenarioError::Shape`].
pub fn expect_body<T: DeserializeOwned>(
    response: &ApiResponse,
    expected: HttpStatus,
    schema: &ContractSchema<T>,
) -> Result<T, ScenarioError> {
    expect_status(response, expected)?;
    Ok(response.parse(schema)?)
}

/// Asserts `200 OK` and decodes the body through `schema`.
///
/// # Errors
///
/// Returns [`ScenarioError::StatusMismatch`] or [`ScenarioError::Shape`].
pub fn expect_ok<T: DeserializeOwned>(
    response: &ApiResponse,
    schema: &ContractSchema<T>,
) -> Result<T, ScenarioError> {
    expect_body(response, HttpStatus::Ok, schema)
}

/// Asserts a rejection: the status, the error body shape, and that the message
/// names `detail`.
///
/// # Errors
///
/// Returns the first failing check.
pub fn expect_error(
    response: &ApiResponse,
    expected: HttpStatus,
    detail: &str,
) -> Result<ErrorResponse, ScenarioError> {
    let body = expect_body(response, expected, &schemas::error_response())?;
    if !body.message.contains(detail) {
        return Err(postcondition!("error message {:?} does not mention {detail:?}", body.message));
    }
    Ok(body)
}

// ============================================================================
// SECTION: Postconditions
// ============================================================================

/// Asserts `len <= max`.
///
/// # Errors
///
/// Returns [`ScenarioError::Postcondition`] when the bound is exceeded.
pub fn expect_len_at_most(what: &str, len: usize, max: u64) -> Result<(), ScenarioError> {
    if u64::try_from(len).is_ok_and(|len| len <= max) {
        return Ok(());
    }
    Err(postcondition!("{what}: expected at most {max} items, found {len}"))
}

/// Asserts `len == expected`.
///
/// # Errors
///
/// Returns [`ScenarioError::Postcondition`] on a different length.
pub fn expect_len(what: &str, len: usize, expected: usize) -> Result<(), ScenarioError> {
    if len == expected {
        return Ok(());
    }
    Err(postcondition!("{what}: expected {expected} items, found {len}"))
}

/// Asserts `values` are ordered by `order`; equal neighbours are allowed.
///
/// # Errors
///
/// Returns [`ScenarioError::Postcondition`] naming the first inversion.
pub fn expect_sorted<T: PartialOrd + Debug>(
    what: &str,
    values: &[T],
    order: SortOrder,
) -> Result<(), ScenarioError> {
    for (index, pair) in values.windows(2).enumerate() {
        let in_order = match order {
            SortOrder::Asc => pair[0] <= pair[1],
            SortOrder::Desc => pair[0] >= pair[1],
        };
        if !in_order {
            return Err(postcondition!(
                "{what}: not {} at index {}: {:?} then {:?}",
                order.as_str(),
                index + 1,
                pair[0],
                pair[1]
            ));
        }
    }
    Ok(())
}

/// Asserts every product belongs to `category`.
///
/// # Errors
///
/// Returns [`ScenarioError::Postcondition`] naming the first stray product.
pub fn expect_all_in_category(products: &[Product], category: &str) -> Result<(), ScenarioError> {
    match products.iter().find(|product| product.category != category) {
        None => Ok(()),
        Some(stray) => Err(postcondition!(
            "product {} has category {:?}, expected {category:?}",
            stray.id,
            stray.category
        )),
    }
}

/// Asserts each projected item carries exactly the identifier plus `selected`.
///
/// # Errors
///
/// Returns [`ScenarioError::Postcondition`] naming the first extra or missing
/// field.
pub fn expect_projection(
    items: &[Map<String, Value>],
    selected: &[&str],
) -> Result<(), ScenarioError> {
    for (index, item) in items.iter().enumerate() {
        let allowed = |name: &str| name == IDENTIFIER_FIELD || selected.contains(&name);
        if let Some(extra) = item.keys().find(|name| !allowed(name)) {
            return Err(postcondition!("products[{index}] carries unselected field {extra:?}"));
        }
        let missing = std::iter::once(IDENTIFIER_FIELD)
            .chain(selected.iter().copied())
            .find(|name| !item.contains_key(*name));
        if let Some(missing) = missing {
            return Err(postcondition!("products[{index}] lacks selected field {missing:?}"));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
