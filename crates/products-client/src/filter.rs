// crates/products-client/src/filter.rs
// ============================================================================
// Module: Product Filters
// Description: Optional pagination, projection, and ordering parameters.
// Purpose: Serialize listing options into a stable, ordered query string.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Every listing operation accepts a [`ProductFilter`]. Unset fields are
//! omitted from the query. Serialization order is fixed (`limit`, `skip`,
//! `select`, `sortBy`, `order`, then raw parameters in insertion order) so
//! request logs and stub assertions are stable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

// ============================================================================
// SECTION: Sort Order
// ============================================================================

/// Sort direction for `sortBy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Returns the wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Filter
// ============================================================================

/// Listing options shared by list, search, and category operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Page size.
    pub limit: Option<u64>,
    /// Page offset.
    pub skip: Option<u64>,
    /// Projected field names.
    pub select: Vec<String>,
    /// Sort key.
    pub sort_by: Option<String>,
    /// Sort direction.
    pub order: Option<SortOrder>,
    /// Extra parameters sent verbatim after the typed ones.
    pub raw: Vec<(String, String)>,
}

impl ProductFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the page offset.
    #[must_use]
    pub const fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Sets the projected fields.
    #[must_use]
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the sort key and direction.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.order = Some(order);
        self
    }

    /// Sets the sort key without a direction.
    #[must_use]
    pub fn sort_by(mut self, field: impl Into<String>) -> Self {
        self.sort_by = Some(field.into());
        self
    }

    /// Sets the sort direction without a key.
    #[must_use]
    pub const fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Appends an arbitrary parameter, for probing malformed inputs.
    #[must_use]
    pub fn raw_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.raw.push((name.into(), value.into()));
        self
    }

    /// Returns the selected field names as borrowed strings.
    #[must_use]
    pub fn selected(&self) -> Vec<&str> {
        self.select.iter().map(String::as_str).collect()
    }

    /// Serializes the filter into ordered query pairs.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("skip".to_string(), skip.to_string()));
        }
        if !self.select.is_empty() {
            pairs.push(("select".to_string(), self.select.join(",")));
        }
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sortBy".to_string(), sort_by.clone()));
        }
        if let Some(order) = self.order {
            pairs.push(("order".to_string(), order.as_str().to_string()));
        }
        pairs.extend(self.raw.iter().cloned());
        pairs
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
