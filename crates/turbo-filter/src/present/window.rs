//! Pagination metadata and page-number windows.

use serde::{Deserialize, Serialize};

/// Page counts up to this value are shown without ellipses.
pub const MAX_UNWINDOWED_PAGES: u32 = 7;

/// Number of consecutive page numbers shown around the current page.
pub const WINDOW_WIDTH: u32 = 5;

/// An entry in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "page", rename_all = "lowercase")]
pub enum PageLink {
    /// A clickable page number.
    Page(u32),
    /// A gap of skipped pages, rendered as "…".
    Ellipsis,
}

impl PageLink {
    /// Text shown for this entry.
    pub fn label(&self) -> String {
        match self {
            PageLink::Page(n) => n.to_string(),
            PageLink::Ellipsis => "\u{2026}".to_string(),
        }
    }
}

/// Compute the pagination bar for `current` out of `total` pages.
///
/// ```
/// use turbo_filter::present::{page_window, PageLink::{Ellipsis, Page}};
///
/// assert_eq!(
///     page_window(10, 20),
///     vec![Page(1), Ellipsis, Page(8), Page(9), Page(10), Page(11), Page(12), Ellipsis, Page(20)],
/// );
/// ```
pub fn page_window(current: u32, total: u32) -> Vec<PageLink> {
    page_window_with(current, total, WINDOW_WIDTH)
}

/// Compute the pagination bar with a custom window width.
///
/// When `total <= width + 2` every page is listed. Otherwise a window of
/// `width` pages centred on `current` (shifted to stay inside `1..=total`)
/// is shown together with the first and last page, with an ellipsis on each
/// side where the window does not abut that page.
pub fn page_window_with(current: u32, total: u32, width: u32) -> Vec<PageLink> {
    let total = total.max(1);
    let width = width.max(1);
    let current = current.clamp(1, total);

    if total <= width.saturating_add(2) {
        return (1..=total).map(PageLink::Page).collect();
    }

    let half = width / 2;
    let start = current.saturating_sub(half).max(1);
    let end = start.saturating_add(width - 1).min(total);
    let start = end.saturating_sub(width - 1).max(1);

    let mut links = Vec::with_capacity(width as usize + 4);
    if start > 1 {
        links.push(PageLink::Page(1));
        if start > 2 {
            links.push(PageLink::Ellipsis);
        }
    }
    links.extend((start..=end).map(PageLink::Page));
    if end < total {
        if total - end > 1 {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Page(total));
    }
    links
}

/// Pagination info for a displayed page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info from service-reported totals.
    pub fn new(page: u32, per_page: u32, total: u64, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        let page = page.max(1);
        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Check if on last page.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Check if the current page lies beyond the last page.
    pub fn is_out_of_range(&self) -> bool {
        self.page > self.total_pages
    }

    /// Get start item number (1-indexed), 0 when there are no items.
    pub fn start_item(&self) -> u64 {
        let start = (self.page as u64 - 1) * self.per_page as u64 + 1;
        if self.total == 0 || start > self.total {
            0
        } else {
            start
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u64 {
        (self.page as u64 * self.per_page as u64).min(self.total)
    }

    /// Pagination bar for this page.
    pub fn window(&self) -> Vec<PageLink> {
        page_window(self.page, self.total_pages)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 12, 0, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::PageLink::{Ellipsis, Page};
    use super::*;
    use pretty_assertions::assert_eq;

    fn pages(range: std::ops::RangeInclusive<u32>) -> Vec<PageLink> {
        range.map(Page).collect()
    }

    #[test]
    fn test_small_totals_show_everything() {
        assert_eq!(page_window(3, 5), pages(1..=5));
        assert_eq!(page_window(1, 7), pages(1..=7));
        assert_eq!(page_window(1, 1), vec![Page(1)]);
    }

    #[test]
    fn test_window_at_start() {
        assert_eq!(
            page_window(1, 20),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_window_in_middle() {
        assert_eq!(
            page_window(10, 20),
            vec![Page(1), Ellipsis, Page(8), Page(9), Page(10), Page(11), Page(12), Ellipsis, Page(20)]
        );
    }

    #[test]
    fn test_window_at_end() {
        assert_eq!(
            page_window(20, 20),
            vec![Page(1), Ellipsis, Page(16), Page(17), Page(18), Page(19), Page(20)]
        );
    }

    #[test]
    fn test_any_gap_is_an_ellipsis() {
        assert_eq!(
            page_window(5, 20),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6), Page(7), Ellipsis, Page(20)]
        );
        assert_eq!(
            page_window(4, 8),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Ellipsis, Page(8)]
        );
        assert_eq!(
            page_window(5, 8),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6), Page(7), Page(8)]
        );
    }

    #[test]
    fn test_huge_totals_do_not_overflow() {
        let max = u32::MAX;
        assert_eq!(
            page_window(max, max),
            vec![Page(1), Ellipsis, Page(max - 4), Page(max - 3), Page(max - 2), Page(max - 1), Page(max)]
        );
        assert_eq!(
            page_window(1, max),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(max)]
        );
        assert_eq!(page_window_with(1, 20, u32::MAX), pages(1..=20));
    }

    #[test]
    fn test_huge_page_projects_without_panicking() {
        let p = Pagination::new(u32::MAX, 12, 10, u32::MAX);
        assert!(p.is_last());
        assert_eq!(p.window().last(), Some(&Page(u32::MAX)));
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        assert_eq!(page_window(0, 20), page_window(1, 20));
        assert_eq!(page_window(99, 20), page_window(20, 20));
        assert_eq!(page_window(1, 0), vec![Page(1)]);
    }

    #[test]
    fn test_window_is_stable() {
        for total in 1..40 {
            for current in 1..=total {
                let window = page_window(current, total);
                assert_eq!(window, page_window(current, total));
                assert!(window.contains(&Page(current)));
                assert_eq!(window.first(), Some(&Page(1)));
                assert_eq!(window.last(), Some(&Page(total)));
            }
        }
    }

    #[test]
    fn test_custom_width() {
        assert_eq!(
            page_window_with(6, 12, 3),
            vec![Page(1), Ellipsis, Page(5), Page(6), Page(7), Ellipsis, Page(12)]
        );
    }

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45, 5);
        assert!(p.has_next);
        assert!(p.has_prev);
        assert_eq!(p.start_item(), 11);
        assert_eq!(p.end_item(), 20);
    }

    #[test]
    fn test_pagination_last_page() {
        let p = Pagination::new(5, 10, 45, 5);
        assert!(!p.has_next);
        assert!(p.is_last());
        assert_eq!(p.end_item(), 45);
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(3, 10, 0, 0);
        assert_eq!(p.total_pages, 1);
        assert!(p.is_out_of_range());
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.end_item(), 0);
    }
}
