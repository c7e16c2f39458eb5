// system-tests/tests/suites/positive.rs
// ============================================================================
// Module: Positive Scenarios
// Description: Happy-path Products scenarios with domain postconditions.
// Purpose: Check status, shape, and ordering/filter/projection guarantees.
// Dependencies: system-tests, products-client, products-contract
// ============================================================================

//! ## Overview
//! Each scenario issues exactly one controller call, asserts `200 OK` (or
//! `201 Created` for a create), validates the body against its contract
//! schema, and then checks the postcondition the call promises.

use products_client::HttpTransport;
use products_client::ProductFilter;
use products_client::ProductsController;
use products_client::SortOrder;
use products_contract::HttpStatus;
use products_contract::ProductDraft;
use products_contract::schemas;
use system_tests::assertions::ScenarioError;
use system_tests::assertions::expect_all_in_category;
use system_tests::assertions::expect_body;
use system_tests::assertions::expect_len;
use system_tests::assertions::expect_len_at_most;
use system_tests::assertions::expect_ok;
use system_tests::assertions::expect_projection;
use system_tests::assertions::expect_sorted;
use system_tests::postcondition;

/// Category used by the category scenarios.
pub const CATEGORY: &str = "smartphones";
/// Identifier of a product every catalog carries.
pub const KNOWN_ID: u64 = 1;

type Outcome = Result<(), ScenarioError>;

// ============================================================================
// SECTION: Listing
// ============================================================================

/// `sortBy=title&order=desc&limit=5` returns five titles, non-increasing.
pub async fn list_sorted_by_title_desc<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    let filter = ProductFilter::new().limit(5).sort("title", SortOrder::Desc);
    let page = expect_ok(&api.list_products(&filter).await?, &schemas::products_response())?;
    if page.total >= 5 {
        expect_len("products", page.products.len(), 5)?;
    }
    expect_len_at_most("products", page.products.len(), 5)?;
    expect_sorted("titles", &page.titles(), SortOrder::Desc)
}

/// `limit`/`skip` paging stays within the reported bounds.
pub async fn list_paginates<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    let filter = ProductFilter::new().limit(10).skip(10);
    let page = expect_ok(&api.list_products(&filter).await?, &schemas::products_response())?;
    if page.skip != 10 {
        return Err(postcondition!("expected skip 10, found {}", page.skip));
    }
    expect_len_at_most("products", page.products.len(), 10)?;
    if !page.page_is_consistent() {
        return Err(postcondition!(
            "page of {} with skip {} exceeds total {} or limit {}",
            page.products.len(),
            page.skip,
            page.total,
            page.limit
        ));
    }
    Ok(())
}

// ============================================================================
// SECTION: Categories
// ============================================================================

/// Category entities carry a URL that ends with their own slug.
pub async fn categories_lookup<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    let categories = expect_ok(&api.get_product_categories().await?, &schemas::categories())?;
    if categories.is_empty() {
        return Err(postcondition!("no categories returned"));
    }
    match categories.iter().find(|c| !c.url.ends_with(&format!("/products/category/{}", c.slug)))
    {
        Some(stray) => Err(postcondition!("category {} has url {}", stray.slug, stray.url)),
        None => Ok(()),
    }
}

/// The category list is a non-empty set of slugs including the fixture one.
pub async fn category_list<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    let slugs = expect_ok(&api.get_product_category_list().await?, &schemas::category_list())?;
    if !slugs.iter().any(|slug| slug == CATEGORY) {
        return Err(postcondition!("category list {slugs:?} lacks {CATEGORY}"));
    }
    let mut unique = slugs.clone();
    unique.sort();
    unique.dedup();
    expect_len("category slugs", unique.len(), slugs.len())
}

/// Every product under a category route belongs to that category.
pub async fn products_by_category<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    let response = api.get_products_by_category(CATEGORY, &ProductFilter::new()).await?;
    let page = expect_ok(&response, &schemas::products_response())?;
    if page.products.is_empty() {
        return Err(postcondition!("category {CATEGORY} returned no products"));
    }
    expect_all_in_category(&page.products, CATEGORY)
}

// ============================================================================
// SECTION: Search
// ============================================================================

/// Search honours paging and returns only the identifier plus selected fields.
pub async fn search_with_projection<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    let filter = ProductFilter::new().limit(2).skip(1).select(["title", "price"]);
    let selected = filter.selected();
    let response = api.search_products("phone", &filter).await?;
    let page = expect_ok(&response, &schemas::projected_products_response(&selected))?;
    if page.skip != 1 {
        return Err(postcondition!("expected skip 1, found {}", page.skip));
    }
    expect_len_at_most("products", page.products.len(), 2)?;
    if page.products.is_empty() {
        return Err(postcondition!("search for phone returned nothing"));
    }
    expect_projection(&page.products, &selected)
}

// ============================================================================
// SECTION: Simulated Writes
// ============================================================================

/// A create echoes the supplied title and price with a generated identifier.
pub async fn add_product<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    let draft =
        ProductDraft::new().title("Contract Test Widget").price(19.99).category("groceries");
    let response = api.add_product(&draft).await?;
    let created = expect_body(&response, HttpStatus::Created, &schemas::created_product())?;
    if created.id == 0 {
        return Err(postcondition!("created product has no identifier"));
    }
    if created.title != draft.title || created.price != draft.price {
        return Err(postcondition!(
            "expected title {:?} and price {:?}, found {:?} and {:?}",
            draft.title,
            draft.price,
            created.title,
            created.price
        ));
    }
    Ok(())
}

/// An update returns the addressed product with the new title applied.
pub async fn update_product<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    let draft = ProductDraft::new().title("Renamed By Contract Test");
    let response = api.update_product(KNOWN_ID, &draft).await?;
    let updated = expect_ok(&response, &schemas::updated_product())?;
    if updated.id != KNOWN_ID || updated.title != draft.title {
        return Err(postcondition!(
            "expected id {KNOWN_ID} titled {:?}, found id {} titled {:?}",
            draft.title,
            updated.id,
            updated.title
        ));
    }
    Ok(())
}

/// A delete reports the product as deleted with a timestamp.
pub async fn delete_product<T: HttpTransport>(api: ProductsController<T>) -> Outcome {
    let deleted = expect_ok(&api.delete_product(KNOWN_ID).await?, &schemas::deleted_product())?;
    if deleted.id != KNOWN_ID || !deleted.is_deleted || deleted.deleted_on.is_empty() {
        return Err(postcondition!(
            "expected id {KNOWN_ID} deleted with a timestamp, found {deleted:?}"
        ));
    }
    Ok(())
}
