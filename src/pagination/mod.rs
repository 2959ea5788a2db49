//! Pagination module
//!
//! Walks the registry's result pages one request at a time.
//!
//! # Overview
//!
//! [`ProductPaginator`] is an explicit state machine
//! (`Fresh → Fetching → InPage → Exhausted`) driven by
//! [`ProductPaginator::next_product`]. Every page is sorted on the harvest
//! time; the harvest time of the last delivered record is sent back as
//! `search_after` to get the following page.

mod paginator;
mod types;

pub use paginator::ProductPaginator;
pub use types::{Cursor, PaginationState, PAGE_SIZE, SORT_PROPERTY};
