//! In-memory catalog for engine tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use turbo_catalog::{CatalogService, FetchError, ProductQuery, ProductsResponse};
use turbo_filter::catalog::{FacetCatalog, FacetOption, Product};
use turbo_filter::{BrandId, Price, ProductId};

use crate::lock;

/// Products the scripted catalog pretends to hold for any filter.
pub const TOTAL_PRODUCTS: u64 = 200;

/// Catalog with brands `B1` and `B2`, two models each, and generated
/// products. Delays and failures are scripted per request.
pub struct ScriptedCatalog {
    facets: Mutex<Result<FacetCatalog, FetchError>>,
    models: HashMap<String, Vec<FacetOption>>,
    model_delays: HashMap<String, Duration>,
    search_delays: HashMap<String, Duration>,
    fail_products: Mutex<Option<FetchError>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        let facets = FacetCatalog {
            categories: vec![FacetOption::new("c1", "Tyres"), FacetOption::new("c2", "Brakes")],
            brands: vec![FacetOption::new("B1", "Acme"), FacetOption::new("B2", "Globex")],
        };
        let models = ["B1", "B2"]
            .into_iter()
            .map(|brand| {
                let options = (1..=2)
                    .map(|n| FacetOption::new(format!("{brand}-M{n}"), format!("Model {n}")).with_year(2018 + n))
                    .collect();
                (brand.to_string(), options)
            })
            .collect();

        Self {
            facets: Mutex::new(Ok(facets)),
            models,
            model_delays: HashMap::new(),
            search_delays: HashMap::new(),
            fail_products: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_facets(self, facets: Result<FacetCatalog, FetchError>) -> Self {
        self.set_facets(facets);
        self
    }

    pub fn set_facets(&self, facets: Result<FacetCatalog, FetchError>) {
        *lock(&self.facets) = facets;
    }

    pub fn with_model_delay(mut self, brand: &str, delay: Duration) -> Self {
        self.model_delays.insert(brand.to_string(), delay);
        self
    }

    /// Delay product responses whose search text equals `search`.
    pub fn with_search_delay(mut self, search: &str, delay: Duration) -> Self {
        self.search_delays.insert(search.to_string(), delay);
        self
    }

    pub fn fail_products(&self, error: Option<FetchError>) {
        *lock(&self.fail_products) = error;
    }

    /// Every request received, in order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// Number of requests to one endpoint.
    pub fn count(&self, endpoint: &str) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|c| c.split(' ').next() == Some(endpoint))
            .count()
    }

    fn record(&self, call: String) {
        lock(&self.calls).push(call);
    }
}

impl Default for ScriptedCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogService for ScriptedCatalog {
    async fn facets(&self) -> Result<FacetCatalog, FetchError> {
        self.record("facets".to_string());
        lock(&self.facets).clone()
    }

    async fn models(&self, brand: &BrandId) -> Result<Vec<FacetOption>, FetchError> {
        self.record(format!("models {brand}"));
        if let Some(delay) = self.model_delays.get(brand.as_str()) {
            tokio::time::sleep(*delay).await;
        }
        self.models.get(brand.as_str()).cloned().ok_or_else(|| FetchError::Http {
            status: 404,
            url: format!("models?brand={brand}"),
        })
    }

    async fn products(&self, query: &ProductQuery) -> Result<ProductsResponse, FetchError> {
        let params: Vec<String> = query
            .to_params()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        self.record(format!("products {}", params.join(" ")));

        if let Some(delay) = self.search_delays.get(&query.search) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(error) = lock(&self.fail_products).clone() {
            return Err(error);
        }

        let limit = u64::from(query.limit.max(1));
        let start = u64::from(query.page.saturating_sub(1)) * limit;
        let items = (start..TOTAL_PRODUCTS.min(start + limit))
            .map(|n| Product {
                id: ProductId::new(format!("p{n}")),
                slug: format!("product-{n}"),
                name: format!("Product {n}"),
                price: Price::from_minor_units(1000 + n as i64),
                images: vec![format!("/img/{n}.jpg")],
                description: String::new(),
            })
            .collect();

        Ok(ProductsResponse {
            items,
            total_count: TOTAL_PRODUCTS,
            total_pages: TOTAL_PRODUCTS.div_ceil(limit) as u32,
        })
    }
}
