// system-tests/src/assertions/tests.rs
// ============================================================================
// Module: Scenario Assertion Unit Tests
// Description: Failure classification and diff messages for assertions.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::collections::BTreeMap;
use std::time::Duration;

use bytes::Bytes;
use products_client::ApiResponse;
use products_client::ControllerError;
use products_client::SortOrder;
use products_client::TransportError;
use products_contract::HttpStatus;
use products_contract::examples::catalog_example;
use products_contract::schemas;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use super::ScenarioError;
use super::expect_all_in_category;
use super::expect_error;
use super::expect_len;
use super::expect_len_at_most;
use super::expect_ok;
use super::expect_projection;
use super::expect_sorted;
use super::expect_status;

fn response(status: u16, body: &str) -> ApiResponse {
    ApiResponse::new(
        status,
        BTreeMap::new(),
        Bytes::copy_from_slice(body.as_bytes()),
        Duration::from_millis(1),
    )
}

fn item(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

#[test]
fn status_mismatch_shows_both_codes_and_body() {
    let err = expect_status(&response(200, r#"{"id":1}"#), HttpStatus::NotFound).unwrap_err();
    assert_eq!(err.kind(), "status_mismatch");
    assert_eq!(err.to_string(), r#"expected status 404 NOT_FOUND, found 200 OK: {"id":1}"#);
}

#[test]
fn status_mismatch_body_is_truncated() {
    let long = "x".repeat(2_000);
    let err = expect_status(&response(500, &long), HttpStatus::Ok).unwrap_err();
    let ScenarioError::StatusMismatch {
        body,
        ..
    } = err
    else {
        panic!("expected a status mismatch");
    };
    assert_eq!(body.len(), super::BODY_EXCERPT_CHARS);
}

#[test]
fn unknown_codes_are_described_by_class() {
    let err = expect_status(&response(418, ""), HttpStatus::Ok).unwrap_err();
    assert!(err.to_string().contains("found 418 (client_error)"), "{err}");
}

#[test]
fn ok_bodies_are_validated_after_the_status() {
    let body = json!(["beauty", "groceries"]).to_string();
    let list = expect_ok(&response(200, &body), &schemas::category_list()).unwrap();
    assert_eq!(list, vec!["beauty".to_string(), "groceries".to_string()]);

    let err = expect_ok(&response(200, r#"["beauty", 7]"#), &schemas::category_list());
    assert_eq!(err.unwrap_err().kind(), "shape");

    let err = expect_ok(&response(404, r#"{"message":"gone"}"#), &schemas::category_list());
    assert_eq!(err.unwrap_err().kind(), "status_mismatch");
}

#[test]
fn errors_must_mention_the_detail() {
    let not_found = response(404, r#"{"message":"Product with id '0' not found"}"#);
    let body = expect_error(&not_found, HttpStatus::NotFound, "'0'").unwrap();
    assert!(body.message.starts_with("Product with id"));

    let err = expect_error(&not_found, HttpStatus::NotFound, "'-1'").unwrap_err();
    assert_eq!(err.kind(), "postcondition");

    let err = expect_error(&response(404, "Not Found"), HttpStatus::NotFound, "x").unwrap_err();
    assert_eq!(err.kind(), "shape");
}

#[test]
fn length_bounds() {
    assert!(expect_len_at_most("page", 5, 5).is_ok());
    assert!(expect_len_at_most("page", 0, 0).is_ok());
    let err = expect_len_at_most("page", 6, 5).unwrap_err();
    assert_eq!(err.to_string(), "postcondition failed: page: expected at most 5 items, found 6");

    assert!(expect_len("page", 3, 3).is_ok());
    assert!(expect_len("page", 2, 3).is_err());
}

#[test]
fn sorting_allows_ties_and_reports_the_first_inversion() {
    assert!(expect_sorted("titles", &["c", "b", "b", "a"], SortOrder::Desc).is_ok());
    assert!(expect_sorted("titles", &["a", "a", "b"], SortOrder::Asc).is_ok());
    assert!(expect_sorted::<&str>("titles", &[], SortOrder::Desc).is_ok());

    let err = expect_sorted("titles", &["c", "a", "b"], SortOrder::Desc).unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"postcondition failed: titles: not desc at index 2: "a" then "b""#
    );
}

#[test]
fn category_membership() {
    let catalog = catalog_example();
    let phones: Vec<_> =
        catalog.iter().filter(|p| p.category == "smartphones").cloned().collect();
    assert!(!phones.is_empty());
    assert!(expect_all_in_category(&phones, "smartphones").is_ok());

    let err = expect_all_in_category(&catalog, "smartphones").unwrap_err();
    assert!(err.to_string().contains("product 1 has category"), "{err}");
}

#[test]
fn projection_is_exact() {
    let selected = ["title", "price"];
    let good = vec![item(json!({"id": 1, "title": "a", "price": 1.0}))];
    assert!(expect_projection(&good, &selected).is_ok());

    let extra = vec![item(json!({"id": 1, "title": "a", "price": 1.0, "stock": 3}))];
    let err = expect_projection(&extra, &selected).unwrap_err();
    assert!(err.to_string().contains(r#"unselected field "stock""#), "{err}");

    let missing = vec![item(json!({"title": "a", "price": 1.0}))];
    let err = expect_projection(&missing, &selected).unwrap_err();
    assert!(err.to_string().contains(r#"lacks selected field "id""#), "{err}");
}

#[test]
fn infrastructure_is_separate_from_contract_failures() {
    let err: ScenarioError =
        ControllerError::Transport(TransportError::Connect("refused".to_string())).into();
    assert!(err.is_infrastructure());
    assert_eq!(err.kind(), "infrastructure");
    assert!(ScenarioError::TimedOut(Duration::from_secs(1)).is_infrastructure());
    assert!(!ScenarioError::Postcondition("x".to_string()).is_infrastructure());
}
