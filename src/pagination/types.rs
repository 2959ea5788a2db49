//! Pagination types
//!
//! States of the paginator and the cursor it carries between pages.

/// Property every page is sorted on, and whose last value resumes the next page
pub const SORT_PROPERTY: &str = "ops:Harvest_Info.ops:harvest_date_time";

/// Number of products requested per page
pub const PAGE_SIZE: u32 = 100;

/// Where the paginator is in a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationState {
    /// No request issued yet
    #[default]
    Fresh,
    /// A page must be (re)fetched before the next record
    Fetching,
    /// Records of the current page are being handed out
    InPage,
    /// Every result has been delivered, or the query matched nothing
    Exhausted,
}

/// Position of a traversal
///
/// Reflects exactly the last record handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// Harvest time of the last delivered record
    pub search_after: Option<String>,
    /// Records per page
    pub page_size: u32,
    /// Pages fully drained; `None` until the first page arrives
    pub page_index: Option<u64>,
    /// Hit count reported by the first page
    pub total_hits: Option<u64>,
    /// `ceil(total_hits / page_size)`
    pub expected_pages: Option<u64>,
}

impl Cursor {
    /// Create an empty cursor
    pub fn new(page_size: u32) -> Self {
        Self {
            search_after: None,
            page_size: page_size.max(1),
            page_index: None,
            total_hits: None,
            expected_pages: None,
        }
    }

    /// Whether the first page has been received
    pub fn is_started(&self) -> bool {
        self.page_index.is_some()
    }

    /// Record the hit count of the first page
    pub fn begin(&mut self, hits: u64) {
        self.total_hits = Some(hits);
        self.expected_pages = Some(hits.div_ceil(u64::from(self.page_size)));
        self.page_index = Some(0);
    }

    /// Move past a delivered record
    pub fn advance(&mut self, sort_value: impl Into<String>) {
        self.search_after = Some(sort_value.into());
    }

    /// Count the current page as drained
    pub fn complete_page(&mut self) {
        self.page_index = Some(self.page_index.map_or(1, |index| index + 1));
    }

    /// Whether the expected number of pages has been drained
    pub fn is_last_page_reached(&self) -> bool {
        match (self.page_index, self.expected_pages) {
            (Some(index), Some(expected)) => index >= expected,
            _ => false,
        }
    }

    /// Forget everything
    pub fn clear(&mut self) {
        *self = Self::new(self.page_size);
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}
