// crates/products-contract/src/examples.rs
// ============================================================================
// Module: Contract Examples
// Description: Canonical example payloads for the Products contract.
// Purpose: Provide deterministic catalog data for docs, stubs, and tests.
// Dependencies: crate::types
// ============================================================================

//! ## Overview
//! Examples are built from the real payload types so they can never drift
//! from the schemas. The catalog is small, deterministic, and spread across
//! several categories so that sorting, paging, searching, and category
//! filtering all have something to bite on.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::types::Category;
use crate::types::Dimensions;
use crate::types::ErrorResponse;
use crate::types::Product;
use crate::types::ProductMeta;
use crate::types::Review;
use crate::types::product_not_found_message;

// ============================================================================
// SECTION: Catalog Table
// ============================================================================

/// Seed row: title, category slug, price, stock, brand.
type Seed = (&'static str, &'static str, f64, u64, Option<&'static str>);

/// Catalog seeds; identifiers are assigned by position starting at 1.
const SEEDS: &[Seed] = &[
    ("Essence Mascara Lash Princess", "beauty", 9.99, 99, Some("Essence")),
    ("Eyeshadow Palette with Mirror", "beauty", 19.99, 34, Some("Glamour Beauty")),
    ("Powder Canister", "beauty", 14.99, 89, Some("Velvet Touch")),
    ("Calvin Klein CK One", "fragrances", 49.99, 29, Some("Calvin Klein")),
    ("Chanel Coco Noir Eau De", "fragrances", 129.99, 58, Some("Chanel")),
    ("Annibale Colombo Bed", "furniture", 1899.99, 47, Some("Annibale Colombo")),
    ("Bedside Table African Cherry", "furniture", 299.99, 16, Some("Furniture Co.")),
    ("Apple", "groceries", 1.99, 8, None),
    ("Beef Steak", "groceries", 12.99, 86, None),
    ("Apple MacBook Pro 14 Inch Space Grey", "laptops", 1999.99, 24, Some("Apple")),
    ("Asus Zenbook Pro Dual Screen Laptop", "laptops", 1799.99, 45, Some("Asus")),
    ("iPhone 5s", "smartphones", 199.99, 65, Some("Apple")),
    ("iPhone 6", "smartphones", 299.99, 99, Some("Apple")),
    ("Oppo A57", "smartphones", 249.99, 21, Some("Oppo")),
    ("Samsung Galaxy S8", "smartphones", 499.99, 40, Some("Samsung")),
    ("Vivo X21", "smartphones", 379.99, 11, Some("Vivo")),
];

/// Fixed catalog timestamp.
const CATALOG_TIMESTAMP: &str = "2024-05-23T08:56:21.618Z";

/// Image host used by example URLs.
const IMAGE_HOST: &str = "https://cdn.dummyjson.com/product-images";

// ============================================================================
// SECTION: Example Builders
// ============================================================================

/// Returns the full example catalog ordered by identifier.
#[must_use]
pub fn catalog_example() -> Vec<Product> {
    SEEDS
        .iter()
        .zip(1u64..)
        .map(|(&(title, category, price, stock, brand), id)| {
            product_example(id, title, category, price, stock, brand)
        })
        .collect()
}

/// Builds one complete, schema-valid product.
#[must_use]
pub fn product_example(
    id: u64,
    title: &str,
    category: &str,
    price: f64,
    stock: u64,
    brand: Option<&str>,
) -> Product {
    let images_root = format!("{IMAGE_HOST}/{category}/{id}");
    Product {
        id,
        title: title.to_string(),
        description: format!("{title} from the {category} collection."),
        category: category.to_string(),
        price,
        discount_percentage: 7.17,
        rating: 4.5,
        stock,
        tags: vec![category.to_string()],
        brand: brand.map(str::to_string),
        sku: format!("PRD-{id:04}"),
        weight: 2.0,
        dimensions: Dimensions {
            width: 23.17,
            height: 14.43,
            depth: 28.01,
        },
        warranty_information: "1 month warranty".to_string(),
        shipping_information: "Ships in 1 month".to_string(),
        availability_status: if stock < 10 { "Low Stock" } else { "In Stock" }.to_string(),
        reviews: vec![
            Review {
                rating: 5.0,
                comment: "Very satisfied!".to_string(),
                date: CATALOG_TIMESTAMP.to_string(),
                reviewer_name: "Scarlett Wright".to_string(),
                reviewer_email: "scarlett.wright@x.dummyjson.com".to_string(),
            },
            Review {
                rating: 3.0,
                comment: "Would not buy again!".to_string(),
                date: CATALOG_TIMESTAMP.to_string(),
                reviewer_name: "Eleanor Collins".to_string(),
                reviewer_email: "eleanor.collins@x.dummyjson.com".to_string(),
            },
        ],
        return_policy: "30 days return policy".to_string(),
        minimum_order_quantity: 1.0,
        meta: ProductMeta {
            created_at: CATALOG_TIMESTAMP.to_string(),
            updated_at: CATALOG_TIMESTAMP.to_string(),
            barcode: format!("{:013}", 9_164_035_109_868u64 + id),
            qr_code: "https://assets.dummyjson.com/public/qr-code.png".to_string(),
        },
        thumbnail: format!("{images_root}/thumbnail.png"),
        images: vec![format!("{images_root}/1.png"), format!("{images_root}/2.png")],
    }
}

/// Returns the category slugs of the example catalog, sorted and unique.
#[must_use]
pub fn category_list_example() -> Vec<String> {
    let mut slugs: Vec<String> = SEEDS.iter().map(|seed| seed.1.to_string()).collect();
    slugs.sort();
    slugs.dedup();
    slugs
}

/// Returns the category lookup entities, with URLs rooted at `base_url`.
#[must_use]
pub fn categories_example(base_url: &str) -> Vec<Category> {
    let base = base_url.trim_end_matches('/');
    category_list_example()
        .into_iter()
        .map(|slug| Category {
            name: display_name(&slug),
            url: format!("{base}/products/category/{slug}"),
            slug,
        })
        .collect()
}

/// Returns the not-found error body for an identifier.
#[must_use]
pub fn not_found_example(id: &str) -> ErrorResponse {
    ErrorResponse {
        message: product_not_found_message(id),
    }
}

/// Turns a slug into a display name (`home-decoration` -> `Home Decoration`).
fn display_name(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
