//! Catalog service access for TurboBrowse.
//!
//! This crate provides:
//! - `CatalogService` - The seam between the browsing engine and the remote catalog
//! - `HttpCatalogClient` - JSON-over-HTTP implementation with timeout/retry
//! - `DependencyTag` - Per-endpoint defaults
//! - `TimeoutConfig` / `RetryPolicy` - Fetch policies

mod client;
mod dependency;
mod error;
mod query;
mod retry;
mod service;
mod timeout;

pub use client::*;
pub use dependency::*;
pub use error::*;
pub use query::*;
pub use retry::*;
pub use service::*;
pub use timeout::*;
