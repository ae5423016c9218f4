//! Engine error types.

use thiserror::Error;
use turbo_catalog::FetchError;

/// Errors surfaced by the browsing engine.
///
/// Fetch failures during browsing are converted to status flags and never
/// returned from session methods; this type covers setup problems.
#[derive(Error, Debug)]
pub enum BrowseError {
    /// Catalog client could not be created.
    #[error("Catalog error: {0}")]
    Catalog(#[from] FetchError),

    /// Config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed.
    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse { path: String, message: String },

    /// Config values are out of range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
