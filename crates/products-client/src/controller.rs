// crates/products-client/src/controller.rs
// ============================================================================
// Module: Products Controller
// Description: One method per Products API operation.
// Purpose: Build requests, delegate to the transport, and audit every call.
// Dependencies: products-contract, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The controller is deliberately thin. It maps each operation onto a method,
//! path, query, and body, hands the request to its [`HttpTransport`], and
//! returns whatever response comes back. It never validates, never retries,
//! and never turns a non-2xx status into an error; scenarios decide what a
//! status means.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;

use crate::audit::NoopAuditSink;
use crate::audit::RequestAuditEvent;
use crate::audit::RequestAuditEventParams;
use crate::audit::RequestAuditSink;
use crate::audit::RequestOutcome;
use crate::filter::ProductFilter;
use crate::id::ProductId;
use crate::request::ApiRequest;
use crate::request::RequestMethod;
use crate::response::ApiResponse;
use crate::transport::HttpTransport;
use crate::transport::TransportError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Root path segment of the resource.
pub const RESOURCE: &str = "products";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure to complete a controller call.
///
/// # Invariants
/// - Any received HTTP response, whatever its status, is returned as `Ok`.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// No response was obtained.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The request body could not be serialized.
    #[error("request body encoding failed: {0}")]
    Encode(String),
}

// ============================================================================
// SECTION: Controller
// ============================================================================

/// Resource controller for `/products`.
pub struct ProductsController<T> {
    /// Request executor.
    transport: T,
    /// Audit destination.
    audit: Arc<dyn RequestAuditSink>,
    /// Last issued sequence number.
    sequence: AtomicU64,
}

impl<T: HttpTransport> ProductsController<T> {
    /// Creates a controller that does not audit.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            audit: Arc::new(NoopAuditSink),
            sequence: AtomicU64::new(0),
        }
    }

    /// Routes audit events to `sink`.
    #[must_use]
    pub fn with_audit_sink(mut self, sink: Arc<dyn RequestAuditSink>) -> Self {
        self.audit = sink;
        self
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns how many calls this controller has issued.
    #[must_use]
    pub fn calls_issued(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// `GET /products` with optional paging, projection, and ordering.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Transport`] when no response is obtained.
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<ApiResponse, ControllerError> {
        let request =
            ApiRequest::new(RequestMethod::Get, [RESOURCE]).with_query(filter.to_query());
        self.send("list_products", request).await
    }

    /// `GET /products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Transport`] when no response is obtained.
    pub async fn get_product_by_id(
        &self,
        id: impl Into<ProductId>,
    ) -> Result<ApiResponse, ControllerError> {
        let id = id.into().to_string();
        let request = ApiRequest::new(RequestMethod::Get, [RESOURCE.to_string(), id]);
        self.send("get_product_by_id", request).await
    }

    /// `GET /products/search?q=...` followed by the filter parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Transport`] when no response is obtained.
    pub async fn search_products(
        &self,
        query: &str,
        filter: &ProductFilter,
    ) -> Result<ApiResponse, ControllerError> {
        let mut pairs = vec![("q".to_string(), query.to_string())];
        pairs.extend(filter.to_query());
        let request = ApiRequest::new(RequestMethod::Get, [RESOURCE, "search"]).with_query(pairs);
        self.send("search_products", request).await
    }

    /// `GET /products/categories`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Transport`] when no response is obtained.
    pub async fn get_product_categories(&self) -> Result<ApiResponse, ControllerError> {
        let request = ApiRequest::new(RequestMethod::Get, [RESOURCE, "categories"]);
        self.send("get_product_categories", request).await
    }

    /// `GET /products/category-list`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Transport`] when no response is obtained.
    pub async fn get_product_category_list(&self) -> Result<ApiResponse, ControllerError> {
        let request = ApiRequest::new(RequestMethod::Get, [RESOURCE, "category-list"]);
        self.send("get_product_category_list", request).await
    }

    /// `GET /products/category/{category}`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Transport`] when no response is obtained.
    pub async fn get_products_by_category(
        &self,
        category: &str,
        filter: &ProductFilter,
    ) -> Result<ApiResponse, ControllerError> {
        let request = ApiRequest::new(RequestMethod::Get, [RESOURCE, "category", category])
            .with_query(filter.to_query());
        self.send("get_products_by_category", request).await
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    /// `POST /products/add` with `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Encode`] when `body` cannot be serialized and
    /// [`ControllerError::Transport`] when no response is obtained.
    pub async fn add_product<B>(&self, body: &B) -> Result<ApiResponse, ControllerError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let request = ApiRequest::new(RequestMethod::Post, [RESOURCE, "add"]);
        let request = self.attach_body("add_product", request, body)?;
        self.send("add_product", request).await
    }

    /// `PUT /products/{id}` with `body` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Encode`] when `body` cannot be serialized and
    /// [`ControllerError::Transport`] when no response is obtained.
    pub async fn update_product<B>(
        &self,
        id: impl Into<ProductId>,
        body: &B,
    ) -> Result<ApiResponse, ControllerError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let id = id.into().to_string();
        let request = ApiRequest::new(RequestMethod::Put, [RESOURCE.to_string(), id]);
        let request = self.attach_body("update_product", request, body)?;
        self.send("update_product", request).await
    }

    /// `DELETE /products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Transport`] when no response is obtained.
    pub async fn delete_product(
        &self,
        id: impl Into<ProductId>,
    ) -> Result<ApiResponse, ControllerError> {
        let id = id.into().to_string();
        let request = ApiRequest::new(RequestMethod::Delete, [RESOURCE.to_string(), id]);
        self.send("delete_product", request).await
    }

    // ------------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------------

    /// Serializes `body` onto `request`, auditing an encode failure.
    fn attach_body<B>(
        &self,
        operation: &'static str,
        request: ApiRequest,
        body: &B,
    ) -> Result<ApiRequest, ControllerError>
    where
        B: Serialize + ?Sized,
    {
        match serde_json::to_vec(body) {
            Ok(bytes) => Ok(request.with_body(bytes)),
            Err(err) => {
                self.audit.record(&RequestAuditEvent::new(RequestAuditEventParams {
                    sequence: self.next_sequence(),
                    operation,
                    method: request.method.as_str(),
                    path: request.display_path(),
                    query: request.display_query(),
                    outcome: RequestOutcome::EncodeError,
                    status: None,
                    error_kind: Some("encode"),
                    request_bytes: 0,
                    response_bytes: 0,
                    elapsed_ms: 0,
                }));
                Err(ControllerError::Encode(err.to_string()))
            }
        }
    }

    /// Executes `request` and records exactly one audit event.
    async fn send(
        &self,
        operation: &'static str,
        request: ApiRequest,
    ) -> Result<ApiResponse, ControllerError> {
        let sequence = self.next_sequence();
        let method = request.method.as_str();
        let path = request.display_path();
        let query = request.display_query();
        let request_bytes = request.body_len();
        let started = Instant::now();

        let result = self.transport.execute(request).await;

        let (outcome, status, error_kind, response_bytes) = match &result {
            Ok(response) => {
                (RequestOutcome::Response, Some(response.status()), None, response.body().len())
            }
            Err(err) => (RequestOutcome::TransportError, None, Some(err.kind()), 0),
        };
        self.audit.record(&RequestAuditEvent::new(RequestAuditEventParams {
            sequence,
            operation,
            method,
            path,
            query,
            outcome,
            status,
            error_kind,
            request_bytes,
            response_bytes,
            elapsed_ms: started.elapsed().as_millis(),
        }));
        result.map_err(ControllerError::Transport)
    }

    /// Issues the next sequence number, starting at 1.
    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed).saturating_add(1)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
