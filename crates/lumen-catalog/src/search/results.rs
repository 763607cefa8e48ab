//! Listing results and pagination.

use serde::Serialize;

use crate::catalog::Product;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages, at least 1.
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. `page` and `per_page` are raised to 1.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let page = page.max(1);
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page).max(1);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Page numbers for display, a window of at most `max_visible` around
    /// the current page.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<usize> {
        if self.total_pages <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let half = max_visible / 2;
        let current = self.page.min(self.total_pages);
        let start = current.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    /// First item number on this page (1-indexed), 0 when empty.
    pub fn start_item(&self) -> usize {
        if self.total == 0 || self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Last item number on this page, 0 when empty.
    pub fn end_item(&self) -> usize {
        if self.start_item() == 0 {
            0
        } else {
            self.page.saturating_mul(self.per_page).min(self.total)
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, 24, 0)
    }
}

/// One page of a product listing.
#[derive(Debug, Clone, Serialize)]
pub struct Listing<'a> {
    pub items: Vec<&'a Product>,
    pub pagination: Pagination,
}

impl<'a> Listing<'a> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
