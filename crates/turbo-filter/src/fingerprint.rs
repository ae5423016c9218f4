//! Request fingerprints.

use crate::state::FilterState;
use crate::url::{canonical_params, join};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic identity of a product request.
///
/// Built from every facet, the search text, the page and the page size, so
/// two requests share a fingerprint exactly when they ask for the same data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint for a state and page size.
    pub fn of(state: &FilterState, page_size: u32) -> Self {
        let mut params = canonical_params(state, true);
        params.push(("limit", page_size.to_string()));
        Self(join(&params))
    }

    /// Get the fingerprint as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
