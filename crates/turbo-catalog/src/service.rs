//! The catalog service seam.

use async_trait::async_trait;
use turbo_filter::catalog::{FacetCatalog, FacetOption};
use turbo_filter::BrandId;

use crate::error::FetchError;
use crate::query::{ProductQuery, ProductsResponse};

/// Remote catalog exposing facet, model and product endpoints.
///
/// Implemented over HTTP by `HttpCatalogClient`; tests substitute scripted
/// in-memory services.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// `GET facets`
    async fn facets(&self) -> Result<FacetCatalog, FetchError>;

    /// `GET models?brand=<id>`
    async fn models(&self, brand: &BrandId) -> Result<Vec<FacetOption>, FetchError>;

    /// `GET products?category=&brand=&model=&search=&page=&limit=`
    async fn products(&self, query: &ProductQuery) -> Result<ProductsResponse, FetchError>;
}
