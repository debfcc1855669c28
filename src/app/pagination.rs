use crate::config::PAGE_SIZE_OPTIONS;
use crate::records::PageResult;

/// Maximum number of page buttons shown at once.
pub const PAGE_WINDOW: u32 = 5;

/// Page position and the totals reported by the last successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub current_page: u32,
    pub records_per_page: u32,
    pub total_pages: u32,
    pub total_records: u64,
}

impl Pagination {
    pub fn new(records_per_page: u32) -> Self {
        Self {
            current_page: 1,
            records_per_page,
            total_pages: 0,
            total_records: 0,
        }
    }

    /// Whether navigating to `page` is allowed; out-of-range targets are disabled, not clamped.
    pub fn can_go_to(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.can_go_to(self.current_page.saturating_sub(1))
    }

    pub fn has_next(&self) -> bool {
        self.can_go_to(self.current_page.saturating_add(1))
    }

    /// Returns true when the page actually changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        let changed = self.current_page != page;
        self.current_page = page;
        changed
    }

    /// Changing the page size always sends the user back to page one.
    pub fn set_records_per_page(&mut self, records_per_page: u32) -> bool {
        let changed = self.records_per_page != records_per_page || self.current_page != 1;
        self.records_per_page = records_per_page;
        self.current_page = 1;
        changed
    }

    /// The page size after the current one in `PAGE_SIZE_OPTIONS`, wrapping around.
    pub fn next_page_size(&self) -> u32 {
        let idx = PAGE_SIZE_OPTIONS
            .iter()
            .position(|size| *size == self.records_per_page)
            .map_or(0, |idx| (idx + 1) % PAGE_SIZE_OPTIONS.len());
        PAGE_SIZE_OPTIONS[idx]
    }

    pub fn apply(&mut self, result: &PageResult) {
        self.total_pages = result.total_pages;
        self.total_records = result.total;
    }

    /// Page numbers to render as buttons.
    pub fn window(&self) -> Vec<u32> {
        let total = self.total_pages;
        if total <= PAGE_WINDOW {
            return (1..=total).collect();
        }

        let half = PAGE_WINDOW / 2;
        let current = self.current_page.clamp(1, total);
        let start = if current <= half + 1 {
            1
        } else if current >= total - half {
            total - PAGE_WINDOW + 1
        } else {
            current - half
        };
        (start..start + PAGE_WINDOW).collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "Page {} of {} ({} total records)",
            self.current_page, self.total_pages, self.total_records
        )
    }
}
