//! Catalog data fetched from the service.
//!
//! Everything here is a read-only snapshot: the browsing view never mutates
//! facet lists or result pages, it only replaces them.

use crate::fingerprint::Fingerprint;
use crate::ids::{BrandId, ProductId};
use crate::price::Price;
use serde::{Deserialize, Serialize};

/// A selectable value of a facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    /// Opaque identifier sent back to the service.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Model year, only present on model options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

impl FacetOption {
    /// Create an option without extra metadata.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            year: None,
        }
    }

    /// Attach a model year.
    pub fn with_year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    /// Label for dropdowns, e.g. "Corolla (2019)".
    pub fn label(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({})", self.name, year),
            None => self.name.clone(),
        }
    }
}

/// Global facet lists, independent of the current filter state.
///
/// Missing lists deserialize as empty so a partial response still renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCatalog {
    #[serde(default)]
    pub categories: Vec<FacetOption>,
    #[serde(default)]
    pub brands: Vec<FacetOption>,
}

impl FacetCatalog {
    /// The degraded "no options" catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether both lists are empty.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.brands.is_empty()
    }

    /// Look up a brand's display name.
    pub fn brand_name(&self, id: &BrandId) -> Option<&str> {
        self.brands
            .iter()
            .find(|b| b.id == id.as_str())
            .map(|b| b.name.as_str())
    }
}

/// Model options scoped to one brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    /// Brand these options belong to.
    pub brand: BrandId,
    /// Model options.
    pub options: Vec<FacetOption>,
}

impl ModelCatalog {
    /// Create a model catalog for a brand.
    pub fn new(brand: BrandId, options: Vec<FacetOption>) -> Self {
        Self { brand, options }
    }

    /// Check whether this catalog belongs to the given brand.
    pub fn is_for(&self, brand: &BrandId) -> bool {
        &self.brand == brand
    }
}

/// Display projection of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub slug: String,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// First image, used as the card thumbnail.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(|s| s.as_str())
    }
}

/// One page of product results, tagged with the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Products on this page, in service order.
    pub items: Vec<Product>,
    /// Total matching products across all pages.
    pub total_count: u64,
    /// Total number of pages (at least 1).
    pub total_pages: u32,
    /// Page this result was requested for (1-indexed).
    pub page: u32,
    /// Page size used for the request.
    pub page_size: u32,
    /// Identity of the request.
    pub fingerprint: Fingerprint,
}

impl ResultPage {
    /// Create a result page. `total_pages` and `page` are clamped to at least 1.
    pub fn new(
        items: Vec<Product>,
        total_count: u64,
        total_pages: u32,
        page: u32,
        page_size: u32,
        fingerprint: Fingerprint,
    ) -> Self {
        Self {
            items,
            total_count,
            total_pages: total_pages.max(1),
            page: page.max(1),
            page_size,
            fingerprint,
        }
    }

    /// Check if the page has no products.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
