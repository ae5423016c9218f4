//! Faceted catalog browsing engine.
//!
//! Keeps the user's filter selections, the shareable URL, the brand-dependent
//! model options and the fetched result page consistent:
//!
//! - `Debouncer` - Keyed debounce timers (URL writes, search-as-you-type)
//! - `ResultFetcher` - Product fetches with last-intent-wins commits
//! - `FacetLoader` - Global facets and brand-scoped model options
//! - `BrowseSession` - Wires the above to a `FilterStore` for one view
//! - `BrowseConfig` - Service, debounce and logging settings

mod config;
mod debounce;
mod error;
mod fetcher;
mod loader;
mod session;
mod sink;
mod status;

#[cfg(test)]
mod testing;

pub use config::*;
pub use debounce::*;
pub use error::*;
pub use fetcher::*;
pub use loader::*;
pub use session::*;
pub use sink::*;
pub use status::*;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
