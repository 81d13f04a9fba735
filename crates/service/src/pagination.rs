//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs,
//! plus the `Page` window returned by paginated listings.

use serde::Serialize;

pub const DEFAULT_PER_PAGE: u64 = 10;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub per_page: u64,
}

impl Pagination {
    /// Build from optional query values, falling back to page 1 / 10 per page.
    pub fn from_query(page: Option<u64>, per_page: Option<u64>) -> Self {
        let d = Self::default();
        Self { page: page.unwrap_or(d.page), per_page: per_page.unwrap_or(d.per_page) }
    }

    /// Map zero values to defaults; returns `(zero_based_page_index, per_page)`.
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = if self.per_page == 0 { DEFAULT_PER_PAGE } else { self.per_page };
        (page - 1, per_page)
    }

    /// Rows to skip before this page. Saturates, so an absurd page number
    /// yields an empty window instead of overflowing.
    pub fn offset(self) -> u64 {
        let (idx, per_page) = self.normalize();
        idx.saturating_mul(per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: DEFAULT_PER_PAGE } }
}

/// One window of a paginated listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64, pagination: Pagination) -> Self {
        let (idx, per_page) = pagination.normalize();
        Self {
            items,
            total_count,
            page: idx + 1,
            per_page,
            total_pages: total_count.div_ceil(per_page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, DEFAULT_PER_PAGE);
    }

    #[test]
    fn normalize_keeps_large_page_sizes() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 1000);
    }

    #[test]
    fn offset_saturates_instead_of_overflowing() {
        assert_eq!(Pagination { page: 3, per_page: 5 }.offset(), 10);
        assert_eq!(Pagination { page: u64::MAX, per_page: 10 }.offset(), u64::MAX);
    }

    #[test]
    fn query_defaults_are_page_one_of_ten() {
        let p = Pagination::from_query(None, None);
        assert_eq!(p, Pagination { page: 1, per_page: 10 });
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![0u8; 5], 12, Pagination { page: 2, per_page: 5 });
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);
        let empty: Page<u8> = Page::new(vec![], 0, Pagination::default());
        assert_eq!(empty.total_pages, 0);
    }
}
