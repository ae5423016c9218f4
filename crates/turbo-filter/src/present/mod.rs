//! Presentation adapter.
//!
//! Turns result pages into display lists with stable product identity and
//! pagination metadata.

mod display;
mod window;

pub use display::{dedup_by_id, merge_pages, project, DisplayList};
pub use window::{page_window, page_window_with, PageLink, Pagination, MAX_UNWINDOWED_PAGES, WINDOW_WIDTH};
