//! Pagination state for the table
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 0-based page index
    pub page_index: usize,
    /// rows per page
    pub page_size: usize,
}

impl Pagination {
    /// Clamp page size to `1..=100`
    pub fn normalize(self) -> Self {
        Self { page_index: self.page_index, page_size: self.page_size.clamp(1, MAX_PAGE_SIZE) }
    }

    /// Pages needed for `total` rows; zero rows means zero pages.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1))
    }

    /// Row range of the current page, clipped to `total`.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = self.page_index.saturating_mul(self.page_size).min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, total: usize) -> bool {
        self.page_index + 1 < self.page_count(total)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page_index: 0, page_size: DEFAULT_PAGE_SIZE } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_clamps_zero_size() {
        let p = Pagination { page_index: 0, page_size: 0 }.normalize();
        assert_eq!(p.page_size, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let p = Pagination { page_index: 4, page_size: 1000 }.normalize();
        assert_eq!(p.page_index, 4);
        assert_eq!(p.page_size, 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page_index, 0);
        assert_eq!(d.page_size, 10);
    }

    #[test]
    fn range_and_navigation() {
        let p = Pagination { page_index: 2, page_size: 10 };
        assert_eq!(p.page_count(25), 3);
        assert_eq!(p.range(25), 20..25);
        assert!(p.can_previous());
        assert!(!p.can_next(25));
        assert!(Pagination::default().can_next(11));
        assert_eq!(Pagination { page_index: 9, page_size: 10 }.range(25), 25..25);
        assert_eq!(Pagination::default().page_count(0), 0);
    }
}
