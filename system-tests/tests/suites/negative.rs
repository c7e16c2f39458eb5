// system-tests/tests/suites/negative.rs
// ============================================================================
// Module: Negative Scenarios
// Description: Rejection-path Products scenarios.
// Purpose: Check that bad identifiers and payloads are refused consistently.
// Dependencies: system-tests, products-client, products-contract
// ============================================================================

//! ## Overview
//! Identifiers and bodies are passed through the controller untouched, so
//! every rejection here comes from the remote API itself. Each scenario
//! asserts the status, validates the error body, and checks that the message
//! names the offending value.

use products_client::HttpTransport;
use products_client::ProductFilter;
use products_client::ProductId;
use products_client::ProductsController;
use products_contract::HttpStatus;
use products_contract::ProductDraft;
use products_contract::schemas;
use serde_json::json;
use system_tests::assertions::ScenarioError;
use system_tests::assertions::expect_error;
use system_tests::assertions::expect_ok;
use system_tests::postcondition;

/// Identifier no catalog is expected to contain.
pub const MISSING_ID: i64 = 99_999;
/// Search term shaped like a SQL injection and a script tag.
pub const INJECTION_QUERY: &str = "' OR '1'='1'; DROP TABLE products; -- <script>";

type Outcome = Result<(), ScenarioError>;

/// Looks up `id` and expects `404` naming it.
async fn expect_lookup_not_found<T: HttpTransport>(
    api: &ProductsController<T>,
    id: impl Into<ProductId>,
) -> Outcome {
    let id = id.into();
    let response = api.get_product_by_id(id.clone()).await?;
    expect_error(&response, HttpStatus::NotFound, &format!("'{id}'"))?;
    Ok(())
}

// ============================================================================
// SECTION: Lookups
// ============================================================================

/// A well-formed but unknown identifier is not found.
pub async fn get_nonexistent_id<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    expect_lookup_not_found(&api, MISSING_ID).await
}

/// Zero is never a valid identifier.
pub async fn get_zero_id<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    expect_lookup_not_found(&api, 0).await
}

/// Negative identifiers are not found rather than rejected as malformed.
pub async fn get_negative_id<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    expect_lookup_not_found(&api, -1).await
}

/// A non-numeric identifier is not found.
pub async fn get_non_numeric_id<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    expect_lookup_not_found(&api, "abc").await
}

// ============================================================================
// SECTION: Search
// ============================================================================

/// Adversarial search input yields an ordinary, well-formed page.
pub async fn search_injection_query<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    let response = api.search_products(INJECTION_QUERY, &ProductFilter::new()).await?;
    if response.status() == HttpStatus::InternalServerError.code() {
        return Err(postcondition!("injection query caused a server error"));
    }
    let page = expect_ok(&response, &schemas::products_response())?;
    if !page.page_is_consistent() {
        return Err(postcondition!("injection query returned an inconsistent page"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Simulated Writes
// ============================================================================

/// A string price is refused with `400` and a message naming the field.
pub async fn update_type_mismatch<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    let body = json!({"price": "not-a-number"});
    let response = api.update_product(1, &body).await?;
    expect_error(&response, HttpStatus::BadRequest, "price")?;
    Ok(())
}

/// Updating an unknown identifier is not found.
pub async fn update_nonexistent_id<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    let draft = ProductDraft::new().title("Ghost");
    let response = api.update_product(MISSING_ID, &draft).await?;
    expect_error(&response, HttpStatus::NotFound, &format!("'{MISSING_ID}'"))?;
    Ok(())
}

/// Deleting an unknown identifier is not found.
pub async fn delete_nonexistent_id<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    let response = api.delete_product(MISSING_ID).await?;
    expect_error(&response, HttpStatus::NotFound, &format!("'{MISSING_ID}'"))?;
    Ok(())
}
