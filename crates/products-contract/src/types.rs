// crates/products-contract/src/types.rs
// ============================================================================
// Module: Products Payload Types
// Description: Typed payloads for the Products resource.
// Purpose: Materialize validated JSON bodies as strongly typed values.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! These types are transient DTOs: they are decoded once per response after
//! structural validation and are not retained beyond a scenario. Wire names
//! are camelCase. Unknown members are ignored on decode, matching the open
//! structural schemas.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Whole Numbers
// ============================================================================

/// Decoders for counts and identifiers.
///
/// The integer shapes accept any JSON number without a fractional part, so
/// `5.0` must decode wherever `5` does.
mod whole_number {
    use serde::Deserialize;
    use serde::Deserializer;
    use serde::de::Error;
    use serde_json::Number;

    /// Exclusive upper bound of `u64` as a float.
    const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

    /// Decodes a required non-negative whole number.
    pub fn u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let number = Number::deserialize(deserializer)?;
        to_u64(&number).ok_or_else(|| not_whole(&number))
    }

    /// Decodes an optional non-negative whole number.
    pub fn option_u64<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        Option::<Number>::deserialize(deserializer)?
            .map(|number| to_u64(&number).ok_or_else(|| not_whole(&number)))
            .transpose()
    }

    /// Returns the value of an integral number within `u64` range.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "The float is checked to be whole and within u64 range first."
    )]
    fn to_u64(number: &Number) -> Option<u64> {
        if let Some(value) = number.as_u64() {
            return Some(value);
        }
        let value = number.as_f64()?;
        let whole = value.is_finite() && value.fract() == 0.0;
        (whole && (0.0..U64_LIMIT).contains(&value)).then_some(value as u64)
    }

    /// Builds the decode error for a fractional or out-of-range number.
    fn not_whole<E: Error>(number: &Number) -> E {
        E::custom(format!("expected a non-negative whole number, found {number}"))
    }
}

// ============================================================================
// SECTION: Product
// ============================================================================

/// Physical dimensions of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Depth.
    pub depth: f64,
}

/// Customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Review score.
    pub rating: f64,
    /// Review text.
    pub comment: String,
    /// Review timestamp as sent by the remote API.
    pub date: String,
    /// Reviewer display name.
    pub reviewer_name: String,
    /// Reviewer e-mail.
    pub reviewer_email: String,
}

/// Catalog bookkeeping metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMeta {
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Barcode.
    pub barcode: String,
    /// QR code image URL.
    pub qr_code: String,
}

/// A complete Products entity as returned by list and lookup endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Positive identifier.
    #[serde(deserialize_with = "whole_number::u64")]
    pub id: u64,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Category slug.
    pub category: String,
    /// Non-negative price.
    pub price: f64,
    /// Discount percentage.
    pub discount_percentage: f64,
    /// Average rating.
    pub rating: f64,
    /// Units in stock.
    #[serde(deserialize_with = "whole_number::u64")]
    pub stock: u64,
    /// Ordered tags.
    pub tags: Vec<String>,
    /// Brand, absent for unbranded products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Stock keeping unit.
    pub sku: String,
    /// Weight.
    pub weight: f64,
    /// Dimensions.
    pub dimensions: Dimensions,
    /// Warranty text.
    pub warranty_information: String,
    /// Shipping text.
    pub shipping_information: String,
    /// Availability label.
    pub availability_status: String,
    /// Ordered reviews.
    pub reviews: Vec<Review>,
    /// Return policy text.
    pub return_policy: String,
    /// Minimum order quantity.
    pub minimum_order_quantity: f64,
    /// Metadata.
    pub meta: ProductMeta,
    /// Thumbnail URL.
    pub thumbnail: String,
    /// Ordered image URLs.
    pub images: Vec<String>,
}

/// One page of products.
///
/// # Invariants
/// - The remote contract implies `products.len() <= limit` and
///   `products.len() + skip <= total`; see [`ProductsResponse::page_is_consistent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsResponse {
    /// Products in the page.
    pub products: Vec<Product>,
    /// Size of the whole collection.
    #[serde(deserialize_with = "whole_number::u64")]
    pub total: u64,
    /// Offset of this page.
    #[serde(deserialize_with = "whole_number::u64")]
    pub skip: u64,
    /// Page size requested.
    #[serde(deserialize_with = "whole_number::u64")]
    pub limit: u64,
}

impl ProductsResponse {
    /// Returns true when the page satisfies the pagination invariants.
    #[must_use]
    pub fn page_is_consistent(&self) -> bool {
        let len = u64::try_from(self.products.len()).unwrap_or(u64::MAX);
        len <= self.limit && len.saturating_add(self.skip) <= self.total
    }

    /// Returns the product titles in page order.
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.products.iter().map(|p| p.title.as_str()).collect()
    }
}

/// One page of field-projected products (`select=...`).
///
/// Entities are kept as raw members because their field set depends on the
/// projection requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedProductsResponse {
    /// Projected entities.
    pub products: Vec<Map<String, Value>>,
    /// Size of the whole collection.
    #[serde(deserialize_with = "whole_number::u64")]
    pub total: u64,
    /// Offset of this page.
    #[serde(deserialize_with = "whole_number::u64")]
    pub skip: u64,
    /// Page size requested.
    #[serde(deserialize_with = "whole_number::u64")]
    pub limit: u64,
}

// ============================================================================
// SECTION: Categories
// ============================================================================

/// Category lookup entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category key used by the category sub-path.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// URL listing the category.
    pub url: String,
}

/// Ordered list of category slugs.
pub type CategoryList = Vec<String>;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Minimal body of any non-2xx JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure description.
    pub message: String,
}

/// Formats the remote not-found message for an identifier.
#[must_use]
pub fn product_not_found_message(id: &str) -> String {
    format!("Product with id '{id}' not found")
}

// ============================================================================
// SECTION: Write Payloads
// ============================================================================

/// Partial product used as a create or update body.
///
/// Unset fields are omitted from the wire form, so a draft only carries what
/// the scenario supplies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Discount percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
    /// Rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Units in stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u64>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Thumbnail URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Image URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl ProductDraft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category slug.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the price.
    #[must_use]
    pub const fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the rating.
    #[must_use]
    pub const fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the stock count.
    #[must_use]
    pub const fn stock(mut self, stock: u64) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Sets the brand.
    #[must_use]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Sets the thumbnail URL.
    #[must_use]
    pub fn thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Sets the image URLs.
    #[must_use]
    pub fn images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = Some(images.into_iter().map(Into::into).collect());
        self
    }
}

/// Body returned by a simulated delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedProduct {
    /// Identifier of the deleted product.
    #[serde(deserialize_with = "whole_number::u64")]
    pub id: u64,
    /// Title at deletion time, when echoed.
    #[serde(default)]
    pub title: Option<String>,
    /// Always true on the success path.
    pub is_deleted: bool,
    /// Deletion timestamp.
    pub deleted_on: String,
}

/// Body returned by a simulated create or update.
///
/// Only the identifier is guaranteed; the rest echoes what was sent merged
/// with what the remote API knows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrittenProduct {
    /// Generated or addressed identifier.
    #[serde(deserialize_with = "whole_number::u64")]
    pub id: u64,
    /// Title.
    #[serde(default)]
    pub title: Option<String>,
    /// Price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Category slug.
    #[serde(default)]
    pub category: Option<String>,
    /// Stock.
    #[serde(default, deserialize_with = "whole_number::option_u64")]
    pub stock: Option<u64>,
}
