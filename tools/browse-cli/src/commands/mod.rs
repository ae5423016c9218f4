//! CLI command implementations.

pub mod explore;
pub mod facets;
pub mod search;
pub mod url;

use clap::Args;

/// Arguments for the decode command.
#[derive(Args)]
pub struct DecodeArgs {
    /// URL or query string, e.g. `/shop?brand=B1&page=3`.
    pub url: String,
}

/// Arguments for the encode command.
#[derive(Args)]
pub struct EncodeArgs {
    /// Category id.
    #[arg(long)]
    pub category: Option<String>,

    /// Brand id.
    #[arg(long)]
    pub brand: Option<String>,

    /// Model id (ignored without a brand).
    #[arg(long)]
    pub model: Option<String>,

    /// Free-text search.
    #[arg(long, default_value = "")]
    pub q: String,

    /// Page number.
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Path to prefix, e.g. `/shop`.
    #[arg(long)]
    pub path: Option<String>,
}

/// Arguments for the models command.
#[derive(Args)]
pub struct ModelsArgs {
    /// Brand id.
    pub brand: String,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// URL or query string describing the filters.
    #[arg(default_value = "")]
    pub url: String,
}

/// Arguments for the explore command.
#[derive(Args)]
pub struct ExploreArgs {
    /// URL to start from.
    #[arg(default_value = "")]
    pub url: String,
}
