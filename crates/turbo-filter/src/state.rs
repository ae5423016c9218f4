//! Filter state and the store that owns it.

use crate::ids::{BrandId, CategoryId, ModelId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A filterable dimension of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    Category,
    Brand,
    /// Depends on `Brand`; meaningless without one.
    Model,
}

impl FacetKind {
    /// Query parameter name used in URLs and service requests.
    pub fn param(&self) -> &'static str {
        match self {
            FacetKind::Category => "category",
            FacetKind::Brand => "brand",
            FacetKind::Model => "model",
        }
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// The canonical query intent of a browsing view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected category.
    pub category: Option<CategoryId>,
    /// Selected brand.
    pub brand: Option<BrandId>,
    /// Selected model. Always `None` when `brand` is `None`.
    pub model: Option<ModelId>,
    /// Free-text search, may be empty.
    pub search: String,
    /// Current page (1-indexed).
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: None,
            brand: None,
            model: None,
            search: String::new(),
            page: 1,
        }
    }
}

impl FilterState {
    /// Create the unfiltered first-page state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the state invariants: page is at least 1 and a model is
    /// only kept together with a brand.
    pub fn normalized(mut self) -> Self {
        if self.page == 0 {
            self.page = 1;
        }
        if self.brand.is_none() {
            self.model = None;
        }
        self
    }
}

/// What triggered a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// A discrete facet selection (radio/checkbox/dropdown).
    Facet(FacetKind),
    /// A free-text search edit.
    Search,
    /// A page navigation.
    Page,
    /// All filters cleared.
    Reset,
    /// Whole state replaced, e.g. on initial URL decode.
    Replace,
}

/// Change notification emitted by every effective store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// What triggered the change.
    pub cause: ChangeCause,
    /// Store revision after the change.
    pub revision: u64,
    /// Whether the brand selection differs from before.
    pub brand_changed: bool,
    /// State after the change.
    pub state: FilterState,
}

impl StateChange {
    /// Check whether this change came from free-text input.
    pub fn is_search_edit(&self) -> bool {
        self.cause == ChangeCause::Search
    }
}

/// Owner of the current `FilterState`.
///
/// Mutators are synchronous and return `Some(StateChange)` only when the
/// state actually changed.
#[derive(Debug, Clone, Default)]
pub struct FilterStore {
    state: FilterState,
    revision: u64,
}

impl FilterStore {
    /// Create a store holding the default state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from an existing state (e.g. one decoded from a URL).
    pub fn from_state(state: FilterState) -> Self {
        Self {
            state: state.normalized(),
            revision: 0,
        }
    }

    /// Get the current state.
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Number of effective mutations applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Select a facet value; an empty value clears the facet.
    ///
    /// Resets the page to 1. Selecting a brand also clears the model.
    /// Selecting a model while no brand is selected is ignored.
    pub fn set_facet(&mut self, kind: FacetKind, value: impl AsRef<str>) -> Option<StateChange> {
        let value = value.as_ref();
        let mut next = self.state.clone();
        match kind {
            FacetKind::Category => next.category = CategoryId::non_empty(value),
            FacetKind::Brand => {
                next.brand = BrandId::non_empty(value);
                next.model = None;
            }
            FacetKind::Model => {
                if next.brand.is_none() {
                    return None;
                }
                next.model = ModelId::non_empty(value);
            }
        }
        next.page = 1;
        self.apply(ChangeCause::Facet(kind), next)
    }

    /// Set the free-text search. Resets the page to 1.
    pub fn set_search(&mut self, text: impl Into<String>) -> Option<StateChange> {
        let mut next = self.state.clone();
        next.search = text.into();
        next.page = 1;
        self.apply(ChangeCause::Search, next)
    }

    /// Navigate to a page. Page 0 is treated as page 1.
    pub fn set_page(&mut self, page: u32) -> Option<StateChange> {
        let mut next = self.state.clone();
        next.page = page.max(1);
        self.apply(ChangeCause::Page, next)
    }

    /// Clear every facet and the search text.
    pub fn reset(&mut self) -> Option<StateChange> {
        self.apply(ChangeCause::Reset, FilterState::default())
    }

    /// Replace the whole state.
    pub fn replace(&mut self, state: FilterState) -> Option<StateChange> {
        self.apply(ChangeCause::Replace, state.normalized())
    }

    fn apply(&mut self, cause: ChangeCause, next: FilterState) -> Option<StateChange> {
        if next == self.state {
            return None;
        }
        let brand_changed = next.brand != self.state.brand;
        self.state = next;
        self.revision += 1;
        Some(StateChange {
            cause,
            revision: self.revision,
            brand_changed,
            state: self.state.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with(brand: &str, model: &str, page: u32) -> FilterStore {
        FilterStore::from_state(FilterState {
            brand: BrandId::non_empty(brand),
            model: ModelId::non_empty(model),
            page,
            ..FilterState::default()
        })
    }

    #[test]
    fn test_brand_change_clears_model_and_page() {
        let mut store = store_with("B1", "M1", 4);
        let change = store.set_facet(FacetKind::Brand, "B2").unwrap();

        assert!(change.brand_changed);
        assert_eq!(store.state().brand, Some(BrandId::new("B2")));
        assert_eq!(store.state().model, None);
        assert_eq!(store.state().page, 1);
    }

    #[test]
    fn test_reselecting_same_brand_still_clears_model() {
        let mut store = store_with("B1", "M1", 1);
        let change = store.set_facet(FacetKind::Brand, "B1").unwrap();

        assert!(!change.brand_changed);
        assert_eq!(store.state().model, None);
    }

    #[test]
    fn test_brand_change_clears_model_for_every_value() {
        for value in ["", "B1", "B2", "weird value"] {
            let mut store = store_with("B1", "M1", 3);
            store.set_facet(FacetKind::Brand, value);
            assert_eq!(store.state().model, None, "brand = {:?}", value);
        }
    }

    #[test]
    fn test_other_facets_reset_page_only() {
        let mut store = store_with("B1", "M1", 5);
        store.set_facet(FacetKind::Category, "tyres");

        assert_eq!(store.state().page, 1);
        assert_eq!(store.state().brand, Some(BrandId::new("B1")));
        assert_eq!(store.state().model, Some(ModelId::new("M1")));
    }

    #[test]
    fn test_model_without_brand_is_ignored() {
        let mut store = FilterStore::new();
        assert!(store.set_facet(FacetKind::Model, "M1").is_none());
        assert_eq!(store.state().model, None);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_set_search_resets_page() {
        let mut store = store_with("", "", 7);
        let change = store.set_search("brake pads").unwrap();

        assert!(change.is_search_edit());
        assert_eq!(store.state().search, "brake pads");
        assert_eq!(store.state().page, 1);
    }

    #[test]
    fn test_set_page_keeps_filters() {
        let mut store = store_with("B1", "M1", 1);
        store.set_page(3);

        assert_eq!(store.state().page, 3);
        assert_eq!(store.state().model, Some(ModelId::new("M1")));
        store.set_page(0);
        assert_eq!(store.state().page, 1);
    }

    #[test]
    fn test_noop_mutation_emits_nothing() {
        let mut store = store_with("B1", "", 1);
        assert!(store.set_page(1).is_none());
        assert!(store.set_search("").is_none());
        assert!(store.set_facet(FacetKind::Category, "").is_none());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_reset() {
        let mut store = store_with("B1", "M1", 9);
        let change = store.reset().unwrap();

        assert_eq!(change.cause, ChangeCause::Reset);
        assert!(change.brand_changed);
        assert_eq!(store.state(), &FilterState::default());
    }

    #[test]
    fn test_revision_increments() {
        let mut store = FilterStore::new();
        store.set_facet(FacetKind::Brand, "B1");
        let change = store.set_facet(FacetKind::Model, "M1").unwrap();
        assert_eq!(change.revision, 2);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_normalized() {
        let state = FilterState {
            model: Some(ModelId::new("orphan")),
            page: 0,
            ..FilterState::default()
        }
        .normalized();
        assert_eq!(state.model, None);
        assert_eq!(state.page, 1);
    }
}
