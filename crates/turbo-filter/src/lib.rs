//! Filter state, URL codec and result presentation for TurboBrowse.
//!
//! This crate holds the pure, synchronous half of catalog browsing:
//!
//! - **State**: `FilterState` and the `FilterStore` that owns it
//! - **URL**: bidirectional mapping between filter state and query strings
//! - **Fingerprint**: request identity used to discard stale responses
//! - **Catalog**: facet options, products and result pages from the service
//! - **Present**: de-duplicated display lists and pagination windows
//!
//! Nothing here performs I/O. The async engine lives in `turbo-browse`.
//!
//! # Example
//!
//! ```rust
//! use turbo_filter::prelude::*;
//!
//! let mut store = FilterStore::from_state(url::decode("?brand=B1&page=3"));
//! store.set_facet(FacetKind::Model, "M2");
//!
//! assert_eq!(store.state().page, 1);
//! assert_eq!(url::encode(store.state()), "?brand=B1&model=M2");
//! ```

pub mod catalog;
pub mod fingerprint;
pub mod ids;
pub mod present;
pub mod price;
pub mod state;
pub mod url;

pub use fingerprint::Fingerprint;
pub use ids::*;
pub use price::Price;
pub use state::{ChangeCause, FacetKind, FilterState, FilterStore, StateChange};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{FacetCatalog, FacetOption, ModelCatalog, Product, ResultPage};
    pub use crate::fingerprint::Fingerprint;
    pub use crate::ids::*;
    pub use crate::present::{page_window, project, DisplayList, PageLink, Pagination};
    pub use crate::price::Price;
    pub use crate::state::{ChangeCause, FacetKind, FilterState, FilterStore, StateChange};
    pub use crate::url;
}
