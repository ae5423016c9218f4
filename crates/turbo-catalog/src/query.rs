//! Wire types for the product endpoint.

use serde::{Deserialize, Serialize};
use turbo_filter::catalog::{Product, ResultPage};
use turbo_filter::{Fingerprint, FilterState};

/// Parameters of a `GET /products` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    pub page: u32,
    pub limit: u32,
}

impl ProductQuery {
    /// Build the request for a filter state.
    pub fn from_state(state: &FilterState, limit: u32) -> Self {
        Self {
            category: state.category.as_ref().map(|id| id.to_string()),
            brand: state.brand.as_ref().map(|id| id.to_string()),
            model: state.model.as_ref().map(|id| id.to_string()),
            search: state.search.clone(),
            page: state.page.max(1),
            limit,
        }
    }

    /// Query pairs with empty parameters omitted.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(6);
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(brand) = &self.brand {
            params.push(("brand", brand.clone()));
        }
        if let Some(model) = &self.model {
            params.push(("model", model.clone()));
        }
        if !self.search.is_empty() {
            params.push(("search", self.search.clone()));
        }
        params.push(("page", self.page.to_string()));
        params.push(("limit", self.limit.to_string()));
        params
    }
}

/// Body of a `GET /products` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    #[serde(default)]
    pub items: Vec<Product>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub total_pages: u32,
}

impl ProductsResponse {
    /// Attach request identity, producing a `ResultPage`.
    pub fn into_page(self, query: &ProductQuery, fingerprint: Fingerprint) -> ResultPage {
        ResultPage::new(
            self.items,
            self.total_count,
            self.total_pages,
            query.page,
            query.limit,
            fingerprint,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use turbo_filter::BrandId;

    #[test]
    fn test_params_omit_empty_filters() {
        let state = FilterState {
            brand: Some(BrandId::new("B1")),
            page: 3,
            ..FilterState::default()
        };
        let query = ProductQuery::from_state(&state, 12);
        assert_eq!(
            query.to_params(),
            vec![
                ("brand", "B1".to_string()),
                ("page", "3".to_string()),
                ("limit", "12".to_string()),
            ]
        );
    }

    #[test]
    fn test_response_camel_case() {
        let body = r#"{"items":[],"totalCount":0,"totalPages":0}"#;
        let response: ProductsResponse = serde_json::from_str(body).unwrap();
        let query = ProductQuery::from_state(&FilterState::default(), 12);
        let page = response.into_page(&query, Fingerprint::of(&FilterState::default(), 12));
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_size, 12);
    }
}
