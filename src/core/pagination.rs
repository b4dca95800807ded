//! # Pagination
//!
//! Pure page arithmetic for the small talk list. Knows nothing about
//! fetching: callers turn [`Pagination::prev`] / [`Pagination::next`] into
//! `Action::ChangePage` and the reducer decides what to load.

/// Snapshot of where the list is. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_items: u64,
    pub items_per_page: u32,
}

impl Pagination {
    pub fn new(current_page: u32, total_items: u64, items_per_page: u32) -> Self {
        Self {
            current_page: current_page.max(1),
            total_items,
            // A zero page size would make every page count meaningless.
            items_per_page: items_per_page.max(1),
        }
    }

    /// `ceil(total_items / items_per_page)`; 0 when there is nothing to page.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total_items.div_ceil(u64::from(self.items_per_page));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// The control renders nothing when there are no items.
    pub fn is_hidden(&self) -> bool {
        self.total_items == 0
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        !self.is_hidden() && self.current_page < self.total_pages()
    }

    pub fn prev(&self) -> Option<u32> {
        self.has_prev().then(|| self.current_page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current_page + 1)
    }

    /// Clamps a requested page into `1..=total_pages` (or to 1 when empty).
    pub fn clamp(&self, page: u32) -> u32 {
        page.clamp(1, self.total_pages().max(1))
    }

    /// Row offset of the current page, as sent to the backend.
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page - 1) * u64::from(self.items_per_page)
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages())
    }
}
