// crates/products-client/src/lib.rs
// ============================================================================
// Module: Products Client Library
// Description: Resource controller for the Products REST API.
// Purpose: Give scenarios one method per endpoint over a pluggable transport.
// Dependencies: async-trait, bytes, products-contract, reqwest, serde, url
// ============================================================================

//! ## Overview
//! [`ProductsController`] maps each Products operation onto a request and
//! returns the raw [`ApiResponse`]. Validation lives in `products-contract`;
//! interpretation lives in the scenarios. The only seam is [`HttpTransport`],
//! implemented for production by [`ReqwestTransport`].
//!
//! Every call emits one [`audit::RequestAuditEvent`] through the configured
//! [`audit::RequestAuditSink`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod controller;
pub mod filter;
pub mod id;
pub mod request;
pub mod response;
pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FanoutAuditSink;
pub use audit::FileAuditSink;
pub use audit::MemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::RequestAuditEvent;
pub use audit::RequestAuditSink;
pub use audit::StderrAuditSink;
pub use controller::ControllerError;
pub use controller::ProductsController;
pub use filter::ProductFilter;
pub use filter::SortOrder;
pub use id::ProductId;
pub use request::ApiRequest;
pub use request::RequestMethod;
pub use response::ApiResponse;
pub use transport::HttpTransport;
pub use transport::ReqwestTransport;
pub use transport::TransportError;
