//! Display lists built from result pages.

use std::collections::HashSet;

use crate::catalog::{Product, ResultPage};
use crate::present::window::{PageLink, Pagination};
use serde::{Deserialize, Serialize};

/// What the browsing view renders for one result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayList {
    /// Products with unique ids, in first-seen order.
    pub products: Vec<Product>,
    /// Pagination info.
    pub pagination: Pagination,
    /// Pagination bar entries.
    pub window: Vec<PageLink>,
}

impl DisplayList {
    /// Check if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Project a result page into a display list.
pub fn project(page: &ResultPage) -> DisplayList {
    let pagination = Pagination::new(page.page, page.page_size, page.total_count, page.total_pages);
    DisplayList {
        products: dedup_by_id(page.items.iter().cloned()),
        window: pagination.window(),
        pagination,
    }
}

/// Remove products whose id was already seen, keeping the first occurrence.
pub fn dedup_by_id(items: impl IntoIterator<Item = Product>) -> Vec<Product> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect()
}

/// Concatenate consecutive pages (infinite-scroll style) without duplicates.
pub fn merge_pages<'a>(pages: impl IntoIterator<Item = &'a ResultPage>) -> Vec<Product> {
    dedup_by_id(pages.into_iter().flat_map(|p| p.items.iter().cloned()))
}
