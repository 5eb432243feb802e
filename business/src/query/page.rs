//! 1-based page state and the window it selects.

use std::ops::Range;

/// Every page size a table may offer.
pub const PAGE_SIZES: [usize; 5] = [5, 10, 25, 50, 100];

/// `[start, end)` slice of the filtered, sorted rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current_page: usize,
    items_per_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(PAGE_SIZES[1])
    }
}

impl PageState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    /// 1-based.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Pages past the end are stored as asked; [`PageState::clamp`] pulls them back.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.reset();
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.items_per_page).max(1)
    }

    pub fn window(&self, total: usize) -> PageWindow {
        let start = (self.current_page - 1).saturating_mul(self.items_per_page);
        if start >= total {
            return PageWindow { start: total, end: total };
        }
        PageWindow {
            start,
            end: (start + self.items_per_page).min(total),
        }
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.current_page < self.total_pages(total)
    }

    pub fn prev(&mut self) {
        if self.has_prev() {
            self.current_page -= 1;
        }
    }

    pub fn next(&mut self, total: usize) {
        if self.has_next(total) {
            self.current_page += 1;
        }
    }

    /// Pull the current page back inside `[1, total_pages]`.
    pub fn clamp(&mut self, total: usize) {
        self.current_page = self.current_page.clamp(1, self.total_pages(total));
    }

    /// Up to `max_links` page numbers around the current page, inside `[1, total_pages]`.
    pub fn page_links(&self, total: usize, max_links: usize) -> Vec<usize> {
        let total_pages = self.total_pages(total);
        let max_links = max_links.clamp(1, total_pages);
        let current = self.current_page.min(total_pages);

        let first = current
            .saturating_sub(max_links / 2)
            .max(1)
            .min(total_pages + 1 - max_links);
        (first..first + max_links).collect()
    }
}
