// crates/products-contract/src/lib.rs
// ============================================================================
// Module: Products Contract Library
// Description: Status taxonomy, structural schemas, and payload types.
// Purpose: Define the consumer contract the Products API is checked against.
// Dependencies: serde, serde_json, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! The contract library is the single source of truth for what a Products
//! response must look like. It owns three concerns:
//!
//! - [`status`]: the closed set of HTTP statuses scenarios assert on.
//! - [`shape`] and [`schemas`]: composable structural descriptors, the
//!   catalog of Products shapes, and their JSON Schema renderings.
//! - [`types`]: the DTOs a checked body decodes into.
//!
//! [`artifacts`] turns the catalog into a deterministic on-disk bundle and
//! [`examples`] provides the canonical payloads used by docs and stubs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod artifacts;
pub mod examples;
pub mod schemas;
pub mod shape;
pub mod status;
pub mod types;

// ============================================================================
// SECTION: Errors
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when generating or verifying contract artifacts.
///
/// # Invariants
/// - [`ContractError::OutputPath`] always carries the offending path.
#[derive(Debug, Error)]
pub enum ContractError {
    /// IO failure while reading or writing artifacts.
    #[error("io error: {0}")]
    Io(String),
    /// Serialization failure while rendering artifacts.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Bundle generation or verification failed.
    #[error("contract generation error: {0}")]
    Generation(String),
    /// Output path invalid or inaccessible.
    #[error("invalid output path: {}", .0.display())]
    OutputPath(PathBuf),
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use artifacts::ArtifactBuilder;
pub use schemas::ContractSchema;
pub use schemas::SchemaError;
pub use schemas::SchemaName;
pub use shape::ObjectShape;
pub use shape::Shape;
pub use shape::ShapeViolation;
pub use status::HttpStatus;
pub use status::StatusClass;
pub use types::Category;
pub use types::DeletedProduct;
pub use types::ErrorResponse;
pub use types::Product;
pub use types::ProductDraft;
pub use types::ProductsResponse;
pub use types::ProjectedProductsResponse;
pub use types::WrittenProduct;
