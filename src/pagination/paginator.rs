//! Cursor-based paginator over a [`ProductSource`]
//!
//! Pages are sorted on the harvest time and resumed with `search_after`.
//! The number of pages is fixed by the hit count of the first page, so
//! products harvested mid-traversal cannot extend it indefinitely.

use super::types::{Cursor, PaginationState, PAGE_SIZE, SORT_PROPERTY};
use crate::error::{Error, Result};
use crate::query::Query;
use crate::registry::{PageRequest, Product, ProductSource};
use tracing::{debug, info};

/// Pull-driven pagination state machine
#[derive(Debug)]
pub struct ProductPaginator {
    state: PaginationState,
    cursor: Cursor,
    page: std::vec::IntoIter<Product>,
}

impl ProductPaginator {
    /// Create a paginator using the standard page size
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    /// Create a paginator with a custom page size
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            state: PaginationState::Fresh,
            cursor: Cursor::new(page_size),
            page: Vec::new().into_iter(),
        }
    }

    /// Current state
    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// Current cursor
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Whether a traversal has started and not yet finished
    pub fn is_paginating(&self) -> bool {
        self.cursor.is_started() && self.state != PaginationState::Exhausted
    }

    /// Whether the traversal has delivered everything
    pub fn is_exhausted(&self) -> bool {
        self.state == PaginationState::Exhausted
    }

    /// Return to [`PaginationState::Fresh`], dropping the cursor and any buffered page
    pub fn reset(&mut self) {
        self.state = PaginationState::Fresh;
        self.cursor.clear();
        self.page = Vec::new().into_iter();
    }

    /// Request for the next page of `query`
    pub fn next_request(&self, query: &Query) -> PageRequest {
        PageRequest {
            q: query.to_q_param(),
            sort: vec![SORT_PROPERTY.to_string()],
            limit: self.cursor.page_size,
            search_after: self.cursor.search_after.clone().map(|value| vec![value]),
            fields: query.fields().to_vec(),
        }
    }

    /// Hand out the next product, fetching a page when needed
    ///
    /// `Ok(None)` means the results are exhausted. Errors leave the cursor
    /// on the last delivered product, so pulling again re-issues the same
    /// page request. A product without a harvest time is never skipped:
    /// every pull fails on it until [`reset`](Self::reset).
    pub async fn next_product<S>(&mut self, source: &S, query: &Query) -> Result<Option<Product>>
    where
        S: ProductSource + ?Sized,
    {
        loop {
            match self.state {
                PaginationState::Exhausted => return Ok(None),
                PaginationState::Fresh | PaginationState::Fetching => {
                    self.state = PaginationState::Fetching;
                    self.fetch_page(source, query).await?;
                }
                PaginationState::InPage => {
                    if let Some(head) = self.page.as_slice().first() {
                        // The record stays at the head of the page on error.
                        let sort_value = head.harvest_time().ok_or_else(|| {
                            Error::decode(format!(
                                "product '{}' has no {SORT_PROPERTY} value",
                                head.id
                            ))
                        })?;
                        self.cursor.advance(sort_value);
                        return Ok(self.page.next());
                    }

                    self.cursor.complete_page();
                    if self.cursor.is_last_page_reached() {
                        debug!(
                            pages = self.cursor.page_index.unwrap_or_default(),
                            "all pages delivered"
                        );
                        self.state = PaginationState::Exhausted;
                    } else {
                        self.state = PaginationState::Fetching;
                    }
                }
            }
        }
    }

    async fn fetch_page<S>(&mut self, source: &S, query: &Query) -> Result<()>
    where
        S: ProductSource + ?Sized,
    {
        let request = self.next_request(query);
        let page = source.product_list(&request).await?;

        if !self.cursor.is_started() {
            let hits = page.summary.hits;
            self.cursor.begin(hits);
            info!(
                hits,
                expected_pages = self.cursor.expected_pages.unwrap_or_default(),
                "query matched {hits} products"
            );

            if hits == 0 {
                self.state = PaginationState::Exhausted;
                return Ok(());
            }
        }

        debug!(
            page = self.cursor.page_index.unwrap_or_default() + 1,
            records = page.data.len(),
            "fetched page"
        );
        self.page = page.data.into_iter();
        self.state = PaginationState::InPage;
        Ok(())
    }
}

impl Default for ProductPaginator {
    fn default() -> Self {
        Self::new()
    }
}
