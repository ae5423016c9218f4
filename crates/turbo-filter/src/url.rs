//! Query-string codec for `FilterState`.
//!
//! URLs are the only persisted form of a browsing view, so the encoding is
//! kept minimal: empty facets and page 1 are omitted, and keys always appear
//! in the same order. For every state the store can reach,
//! `decode(&encode(s)) == s`.

use crate::ids::{BrandId, CategoryId, ModelId};
use crate::state::FilterState;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Category query parameter.
pub const CATEGORY_PARAM: &str = "category";
/// Brand query parameter.
pub const BRAND_PARAM: &str = "brand";
/// Model query parameter.
pub const MODEL_PARAM: &str = "model";
/// Free-text search query parameter.
pub const SEARCH_PARAM: &str = "q";
/// Page query parameter.
pub const PAGE_PARAM: &str = "page";

/// Characters left unescaped in values (RFC 3986 unreserved set).
const VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Decode a query string (or a full URL) into a `FilterState`.
///
/// Missing keys map to "no filter" and page 1, unknown keys are ignored,
/// and a page that is not a positive integer falls back to 1. Facet values
/// are passed through without validation.
pub fn decode(input: &str) -> FilterState {
    let mut state = FilterState::default();

    for (key, value) in query_pairs(input) {
        match key.as_str() {
            CATEGORY_PARAM => state.category = CategoryId::non_empty(value),
            BRAND_PARAM => state.brand = BrandId::non_empty(value),
            MODEL_PARAM => state.model = ModelId::non_empty(value),
            SEARCH_PARAM => state.search = value,
            PAGE_PARAM => state.page = value.trim().parse().unwrap_or(1),
            _ => {}
        }
    }

    state.normalized()
}

/// Encode a `FilterState` as a canonical query string.
///
/// Returns an empty string for the default state, otherwise a string
/// starting with `?`.
pub fn encode(state: &FilterState) -> String {
    let params = canonical_params(state, false);
    if params.is_empty() {
        return String::new();
    }
    format!("?{}", join(&params))
}

/// Append the encoded state to a path, e.g. `/shop` -> `/shop?brand=B1`.
pub fn with_path(path: &str, state: &FilterState) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    format!("{}{}", path, encode(state))
}

/// Ordered key/value pairs for a state.
///
/// With `include_defaults`, every key is present (used for fingerprints).
pub(crate) fn canonical_params(state: &FilterState, include_defaults: bool) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(5);
    let mut push = |key: &'static str, value: Option<&str>| match value {
        Some(v) if !v.is_empty() => params.push((key, v.to_string())),
        _ if include_defaults => params.push((key, String::new())),
        _ => {}
    };

    push(CATEGORY_PARAM, state.category.as_ref().map(|id| id.as_str()));
    push(BRAND_PARAM, state.brand.as_ref().map(|id| id.as_str()));
    push(MODEL_PARAM, state.model.as_ref().map(|id| id.as_str()));
    push(SEARCH_PARAM, Some(state.search.as_str()));

    if include_defaults || state.page > 1 {
        params.push((PAGE_PARAM, state.page.max(1).to_string()));
    }
    params
}

/// Join pairs as `k=v&k=v` with percent-encoded values.
pub(crate) fn join(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, VALUE)))
        .collect::<Vec<_>>()
        .join("&")
}

fn query_pairs(input: &str) -> Vec<(String, String)> {
    let without_fragment = input.split('#').next().unwrap_or_default();
    let query = match without_fragment.split_once('?') {
        Some((_, q)) => q,
        None if without_fragment.contains('=') => without_fragment,
        None => "",
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
