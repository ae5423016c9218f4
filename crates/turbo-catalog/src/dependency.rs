//! Dependency tagging for catalog endpoints.

use std::time::Duration;

/// Catalog endpoints, each with its own latency budget and retry default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyTag {
    /// Global facet lists (categories, brands).
    Facets,
    /// Models for one brand.
    Models,
    /// Paginated product search.
    Products,
}

impl DependencyTag {
    /// Get the default timeout for this endpoint.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Facets => Duration::from_millis(3000),
            Self::Models => Duration::from_millis(2000),
            Self::Products => Duration::from_millis(5000),
        }
    }

    /// Get the default max retries for this endpoint.
    pub fn default_max_retries(&self) -> u32 {
        match self {
            // Facets are fetched once per session, so a retry is cheap.
            Self::Facets => 2,
            Self::Models | Self::Products => 1,
        }
    }

    /// Path of the endpoint relative to the service base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Facets => "/facets",
            Self::Models => "/models",
            Self::Products => "/products",
        }
    }

    /// Get the name of this dependency.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Facets => "facets",
            Self::Models => "models",
            Self::Products => "products",
        }
    }
}

impl std::fmt::Display for DependencyTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
