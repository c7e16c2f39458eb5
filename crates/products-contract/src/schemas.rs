// crates/products-contract/src/schemas.rs
// ============================================================================
// Module: Products Contract Schemas
// Description: Canonical shapes for every Products response body.
// Purpose: Pair structural shapes with typed payloads and export JSON Schema.
// Dependencies: crate::shape, crate::types, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`ContractSchema`] couples a [`Shape`] with the DTO it decodes into.
//! Parsing is two-phase: the structural check runs first so that failures
//! name the offending path and kinds, and only then is the value decoded.
//!
//! New endpoints extend this catalog by composing shapes; the controller is
//! never involved.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::marker::PhantomData;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::shape::ObjectShape;
use crate::shape::Shape;
use crate::shape::ShapeViolation;
use crate::types::Category;
use crate::types::CategoryList;
use crate::types::DeletedProduct;
use crate::types::ErrorResponse;
use crate::types::Product;
use crate::types::ProductsResponse;
use crate::types::ProjectedProductsResponse;
use crate::types::WrittenProduct;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// JSON Schema dialect used for exported schemas.
pub const JSON_SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Prefix of the `$id` of every exported schema.
pub const SCHEMA_ID_PREFIX: &str = "products-contract://schemas/";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure to turn a response body into a checked, typed value.
///
/// # Invariants
/// - [`SchemaError::Violation`] always names the schema and the first
///   violating path.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Body is not JSON.
    #[error("invalid json body: {0}")]
    Syntax(String),
    /// Body is JSON but does not match the declared shape.
    #[error("{schema} shape violation at {violation}")]
    Violation {
        /// Schema name.
        schema: String,
        /// First violation.
        violation: ShapeViolation,
    },
    /// Body matches the shape but could not be decoded into the DTO.
    #[error("{schema} decode failed: {message}")]
    Decode {
        /// Schema name.
        schema: String,
        /// Decoder message.
        message: String,
    },
}

impl SchemaError {
    /// Returns the shape violation when this is a structural failure.
    #[must_use]
    pub const fn violation(&self) -> Option<&ShapeViolation> {
        match self {
            Self::Violation {
                violation, ..
            } => Some(violation),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Contract Schema
// ============================================================================

/// A named shape bound to the payload type it validates.
pub struct ContractSchema<T> {
    /// Schema name used in diagnostics.
    name: String,
    /// Structural descriptor.
    shape: Shape,
    /// Payload type marker.
    payload: PhantomData<fn() -> T>,
}

impl<T> Clone for ContractSchema<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            shape: self.shape.clone(),
            payload: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ContractSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractSchema")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .finish()
    }
}

impl<T: DeserializeOwned> ContractSchema<T> {
    /// Binds `shape` to payload type `T`.
    #[must_use]
    pub fn new(name: impl Into<String>, shape: impl Into<Shape>) -> Self {
        Self {
            name: name.into(),
            shape: shape.into(),
            payload: PhantomData,
        }
    }

    /// Returns the schema name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the structural descriptor.
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Runs the structural check only.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Violation`] with the first violation.
    pub fn check(&self, value: &Value) -> Result<(), SchemaError> {
        self.shape.validate(value).map_err(|violation| SchemaError::Violation {
            schema: self.name.clone(),
            violation,
        })
    }

    /// Returns every structural violation.
    #[must_use]
    pub fn violations(&self, value: &Value) -> Vec<ShapeViolation> {
        self.shape.violations(value)
    }

    /// Validates then decodes `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Violation`] when the shape does not match and
    /// [`SchemaError::Decode`] when decoding fails afterwards.
    pub fn parse(&self, value: &Value) -> Result<T, SchemaError> {
        self.check(value)?;
        T::deserialize(value).map_err(|err| SchemaError::Decode {
            schema: self.name.clone(),
            message: err.to_string(),
        })
    }

    /// Parses JSON bytes, validates, then decodes.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Syntax`] for malformed JSON, otherwise the same
    /// errors as [`ContractSchema::parse`].
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<T, SchemaError> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|err| SchemaError::Syntax(err.to_string()))?;
        self.parse(&value)
    }

    /// Renders the schema as a standalone JSON Schema document.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut schema = self.shape.to_json_schema();
        if let Some(obj) = schema.as_object_mut() {
            obj.insert("$schema".to_string(), Value::from(JSON_SCHEMA_DIALECT));
            let id = format!("{SCHEMA_ID_PREFIX}{}.schema.json", self.name);
            obj.insert("$id".to_string(), Value::from(id));
            obj.entry("title").or_insert_with(|| Value::from(self.name.clone()));
        }
        schema
    }
}

// ============================================================================
// SECTION: Shape Catalog
// ============================================================================

/// Shape of `Product.dimensions`.
#[must_use]
pub fn dimensions_shape() -> ObjectShape {
    ObjectShape::new("Dimensions")
        .field("width", Shape::number())
        .field("height", Shape::number())
        .field("depth", Shape::number())
}

/// Shape of one `Product.reviews` element.
#[must_use]
pub fn review_shape() -> ObjectShape {
    ObjectShape::new("Review")
        .field("rating", Shape::number())
        .field("comment", Shape::String)
        .field("date", Shape::String)
        .field("reviewerName", Shape::String)
        .field("reviewerEmail", Shape::String)
}

/// Shape of `Product.meta`.
#[must_use]
pub fn meta_shape() -> ObjectShape {
    ObjectShape::new("ProductMeta")
        .field("createdAt", Shape::String)
        .field("updatedAt", Shape::String)
        .field("barcode", Shape::String)
        .field("qrCode", Shape::String)
}

/// Shape of a complete Product entity.
#[must_use]
pub fn product_shape() -> ObjectShape {
    ObjectShape::new("Product")
        .field("id", Shape::integer_at_least(1))
        .field("title", Shape::String)
        .field("description", Shape::String)
        .field("category", Shape::String)
        .field("price", Shape::non_negative_number())
        .field("discountPercentage", Shape::number())
        .field("rating", Shape::number())
        .field("stock", Shape::integer_at_least(0))
        .field("tags", Shape::array_of(Shape::String))
        .optional("brand", Shape::String)
        .field("sku", Shape::String)
        .field("weight", Shape::number())
        .field("dimensions", dimensions_shape())
        .field("warrantyInformation", Shape::String)
        .field("shippingInformation", Shape::String)
        .field("availabilityStatus", Shape::String)
        .field("reviews", Shape::array_of(review_shape().into()))
        .field("returnPolicy", Shape::String)
        .field("minimumOrderQuantity", Shape::number())
        .field("meta", meta_shape())
        .field("thumbnail", Shape::String)
        .field("images", Shape::array_of(Shape::String))
}

/// Shape of a page envelope around `item`.
#[must_use]
pub fn page_shape(name: &str, item: ObjectShape) -> ObjectShape {
    ObjectShape::new(name)
        .field("products", Shape::array_of(item.into()))
        .field("total", Shape::integer_at_least(0))
        .field("skip", Shape::integer_at_least(0))
        .field("limit", Shape::integer_at_least(0))
}

/// Shape of the generic error body.
#[must_use]
pub fn error_shape() -> ObjectShape {
    ObjectShape::new("ErrorResponse").field("message", Shape::String)
}

/// Shape of a category lookup entity.
#[must_use]
pub fn category_shape() -> ObjectShape {
    ObjectShape::new("Category")
        .field("slug", Shape::String)
        .field("name", Shape::String)
        .field("url", Shape::String)
}

/// Shape of a simulated delete body.
#[must_use]
pub fn deleted_product_shape() -> ObjectShape {
    product_shape().partial().renamed("DeletedProduct").extend(
        ObjectShape::new("Deletion")
            .field("isDeleted", Shape::Boolean)
            .field("deletedOn", Shape::String),
    )
}

// ============================================================================
// SECTION: Contract Schemas
// ============================================================================

/// Complete Product entity.
#[must_use]
pub fn product() -> ContractSchema<Product> {
    ContractSchema::new("product", product_shape())
}

/// Paginated products listing.
#[must_use]
pub fn products_response() -> ContractSchema<ProductsResponse> {
    ContractSchema::new("products-response", page_shape("ProductsResponse", product_shape()))
}

/// Paginated listing projected to `selected` fields plus the identifier.
#[must_use]
pub fn projected_products_response(
    selected: &[&str],
) -> ContractSchema<ProjectedProductsResponse> {
    ContractSchema::new(
        "projected-products-response",
        page_shape("ProjectedProductsResponse", product_shape().project(selected)),
    )
}

/// Generic error body.
#[must_use]
pub fn error_response() -> ContractSchema<ErrorResponse> {
    ContractSchema::new("error-response", error_shape())
}

/// Category lookup entity.
#[must_use]
pub fn category() -> ContractSchema<Category> {
    ContractSchema::new("category", category_shape())
}

/// Array of category lookup entities.
#[must_use]
pub fn categories() -> ContractSchema<Vec<Category>> {
    ContractSchema::new("categories", Shape::array_of(category_shape().into()))
}

/// Array of category slugs.
#[must_use]
pub fn category_list() -> ContractSchema<CategoryList> {
    ContractSchema::new("category-list", Shape::array_of(Shape::String))
}

/// Body of a simulated create.
#[must_use]
pub fn created_product() -> ContractSchema<WrittenProduct> {
    ContractSchema::new("created-product", product_shape().partial().renamed("CreatedProduct"))
}

/// Body of a simulated update.
#[must_use]
pub fn updated_product() -> ContractSchema<WrittenProduct> {
    ContractSchema::new("updated-product", product_shape().partial().renamed("UpdatedProduct"))
}

/// Body of a simulated delete.
#[must_use]
pub fn deleted_product() -> ContractSchema<DeletedProduct> {
    ContractSchema::new("deleted-product", deleted_product_shape())
}

// ============================================================================
// SECTION: Schema Bundle
// ============================================================================

/// Names of the exported schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaName {
    /// [`product`].
    Product,
    /// [`products_response`].
    ProductsResponse,
    /// [`error_response`].
    ErrorResponse,
    /// [`category`].
    Category,
    /// [`categories`].
    Categories,
    /// [`category_list`].
    CategoryList,
    /// [`created_product`].
    CreatedProduct,
    /// [`updated_product`].
    UpdatedProduct,
    /// [`deleted_product`].
    DeletedProduct,
}

impl SchemaName {
    /// Every exported schema.
    pub const ALL: [Self; 9] = [
        Self::Product,
        Self::ProductsResponse,
        Self::ErrorResponse,
        Self::Category,
        Self::Categories,
        Self::CategoryList,
        Self::CreatedProduct,
        Self::UpdatedProduct,
        Self::DeletedProduct,
    ];

    /// Returns the stable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::ProductsResponse => "products-response",
            Self::ErrorResponse => "error-response",
            Self::Category => "category",
            Self::Categories => "categories",
            Self::CategoryList => "category-list",
            Self::CreatedProduct => "created-product",
            Self::UpdatedProduct => "updated-product",
            Self::DeletedProduct => "deleted-product",
        }
    }

    /// Looks up a schema by its stable name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == name)
    }

    /// Returns the structural shape.
    #[must_use]
    pub fn shape(self) -> Shape {
        match self {
            Self::Product => product().shape,
            Self::ProductsResponse => products_response().shape,
            Self::ErrorResponse => error_response().shape,
            Self::Category => category().shape,
            Self::Categories => categories().shape,
            Self::CategoryList => category_list().shape,
            Self::CreatedProduct => created_product().shape,
            Self::UpdatedProduct => updated_product().shape,
            Self::DeletedProduct => deleted_product().shape,
        }
    }

    /// Returns the standalone JSON Schema document.
    #[must_use]
    pub fn json_schema(self) -> Value {
        match self {
            Self::Product => product().to_json_schema(),
            Self::ProductsResponse => products_response().to_json_schema(),
            Self::ErrorResponse => error_response().to_json_schema(),
            Self::Category => category().to_json_schema(),
            Self::Categories => categories().to_json_schema(),
            Self::CategoryList => category_list().to_json_schema(),
            Self::CreatedProduct => created_product().to_json_schema(),
            Self::UpdatedProduct => updated_product().to_json_schema(),
            Self::DeletedProduct => deleted_product().to_json_schema(),
        }
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns every exported schema as `(name, document)` pairs.
#[must_use]
pub fn schema_bundle() -> Vec<(SchemaName, Value)> {
    SchemaName::ALL.into_iter().map(|name| (name, name.json_schema())).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
