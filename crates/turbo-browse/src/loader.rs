//! Global facets and brand-scoped model options.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, warn};
use turbo_catalog::CatalogService;
use turbo_filter::catalog::{FacetCatalog, FacetOption, ModelCatalog};
use turbo_filter::BrandId;

use crate::lock;

/// Cache of facet data shared by every session on one catalog.
///
/// Only successful responses are stored.
#[derive(Debug, Default)]
pub struct FacetCache {
    global: RwLock<Option<FacetCatalog>>,
    models: RwLock<HashMap<BrandId, Vec<FacetOption>>>,
}

impl FacetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global(&self) -> Option<FacetCatalog> {
        self.global.read().ok().and_then(|g| g.clone())
    }

    pub fn store_global(&self, catalog: FacetCatalog) {
        if let Ok(mut global) = self.global.write() {
            *global = Some(catalog);
        }
    }

    pub fn models(&self, brand: &BrandId) -> Option<Vec<FacetOption>> {
        self.models.read().ok().and_then(|m| m.get(brand).cloned())
    }

    pub fn store_models(&self, brand: BrandId, options: Vec<FacetOption>) {
        if let Ok(mut models) = self.models.write() {
            models.insert(brand, options);
        }
    }
}

/// Result of `FacetLoader::load_models_for_brand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelLoad {
    /// No brand selected; model options were cleared.
    Cleared,
    /// Options for the selected brand were applied.
    Applied(ModelCatalog),
    /// The brand changed while loading; the response was dropped.
    Stale { issued_for: BrandId },
}

#[derive(Debug, Default)]
struct ModelSlot {
    current_brand: Option<BrandId>,
    catalog: Option<ModelCatalog>,
}

/// Loads facet options for a browsing view.
///
/// Failures degrade to empty option lists and are never cached.
pub struct FacetLoader {
    service: Arc<dyn CatalogService>,
    cache: Arc<FacetCache>,
    slot: Mutex<ModelSlot>,
}

impl FacetLoader {
    pub fn new(service: Arc<dyn CatalogService>, cache: Arc<FacetCache>) -> Self {
        Self {
            service,
            cache,
            slot: Mutex::new(ModelSlot::default()),
        }
    }

    /// Global category and brand lists, from cache when available.
    pub async fn load_global_facets(&self) -> FacetCatalog {
        if let Some(cached) = self.cache.global() {
            return cached;
        }
        self.fetch_global().await.unwrap_or_else(FacetCatalog::empty)
    }

    /// Refetch global facets, replacing the cache only on success.
    pub async fn revalidate(&self) -> FacetCatalog {
        match self.fetch_global().await {
            Some(catalog) => catalog,
            None => self.cache.global().unwrap_or_else(FacetCatalog::empty),
        }
    }

    async fn fetch_global(&self) -> Option<FacetCatalog> {
        match self.service.facets().await {
            Ok(catalog) => {
                debug!(
                    categories = catalog.categories.len(),
                    brands = catalog.brands.len(),
                    "loaded global facets"
                );
                self.cache.store_global(catalog.clone());
                Some(catalog)
            }
            Err(e) => {
                warn!(error = %e, "global facets unavailable");
                None
            }
        }
    }

    /// Load model options for `brand`, or clear them when no brand is set.
    ///
    /// A response is applied only if `brand` is still the current brand when
    /// it arrives.
    pub async fn load_models_for_brand(&self, brand: Option<&BrandId>) -> ModelLoad {
        let Some(brand) = brand else {
            let mut slot = lock(&self.slot);
            slot.current_brand = None;
            slot.catalog = None;
            return ModelLoad::Cleared;
        };

        lock(&self.slot).current_brand = Some(brand.clone());

        let options = match self.cache.models(brand) {
            Some(options) => options,
            None => match self.service.models(brand).await {
                Ok(options) => {
                    debug!(brand = %brand, count = options.len(), "loaded models");
                    self.cache.store_models(brand.clone(), options.clone());
                    options
                }
                Err(e) => {
                    warn!(brand = %brand, error = %e, "models unavailable");
                    Vec::new()
                }
            },
        };

        let mut slot = lock(&self.slot);
        if slot.current_brand.as_ref() != Some(brand) {
            debug!(brand = %brand, "discarding stale model response");
            return ModelLoad::Stale {
                issued_for: brand.clone(),
            };
        }
        let catalog = ModelCatalog::new(brand.clone(), options);
        slot.catalog = Some(catalog.clone());
        ModelLoad::Applied(catalog)
    }

    /// Model options currently applied.
    pub fn models(&self) -> Vec<FacetOption> {
        lock(&self.slot)
            .catalog
            .as_ref()
            .map(|c| c.options.clone())
            .unwrap_or_default()
    }

    pub fn current_brand(&self) -> Option<BrandId> {
        lock(&self.slot).current_brand.clone()
    }

    pub fn cached_global(&self) -> Option<FacetCatalog> {
        self.cache.global()
    }
}

impl std::fmt::Debug for FacetLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacetLoader")
            .field("current_brand", &self.current_brand())
            .finish()
    }
}
