//! General product search facade

use crate::error::{Error, Result};
use crate::output::products_to_record_batch;
use crate::pagination::{Cursor, PaginationState, ProductPaginator, SORT_PROPERTY};
use crate::query::{Query, QueryBuilder};
use crate::registry::{Product, ProductSource, RegistryClient};
use arrow::record_batch::RecordBatch;
use futures::stream::{self, Stream};
use tracing::debug;

/// Search over every product of the registry
///
/// Filters are added with the [`QueryBuilder`] predicates, then products are
/// pulled one by one with [`next_product`](Self::next_product) or as a
/// [`stream`](Self::stream). Pages are fetched lazily, a hundred at a time.
///
/// ```rust,ignore
/// use peppi::{Products, QueryBuilder};
///
/// let mut products = Products::connect()?;
/// products
///     .has_target("urn:nasa:pds:context:target:planet.mercury")?
///     .observationals()?;
///
/// while let Some(product) = products.next_product().await? {
///     println!("{}", product.id);
/// }
/// ```
#[derive(Debug)]
pub struct Products<S = RegistryClient> {
    source: S,
    query: Query,
    paginator: ProductPaginator,
}

impl Products<RegistryClient> {
    /// Search the official production registry
    pub fn connect() -> Result<Self> {
        Ok(Self::new(RegistryClient::new()?))
    }
}

impl<S: ProductSource> Products<S> {
    /// Create an unfiltered search backed by `source`
    pub fn new(source: S) -> Self {
        Self::with_query(source, Query::new())
    }

    /// Create a search starting from a prepared query
    pub fn with_query(source: S, query: Query) -> Self {
        Self {
            source,
            query,
            paginator: ProductPaginator::new(),
        }
    }

    /// Source pages are fetched from
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current query
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Current pagination state
    pub fn state(&self) -> PaginationState {
        self.paginator.state()
    }

    /// Current pagination cursor
    pub fn cursor(&self) -> &Cursor {
        self.paginator.cursor()
    }

    /// Whether results of the current query are being paginated
    pub fn is_paginating(&self) -> bool {
        self.paginator.is_paginating()
    }

    /// Restrict the properties returned for each product
    ///
    /// The harvest time property is always kept since it drives pagination.
    /// An empty list selects every property.
    pub fn fields(&mut self, fields: &[&str]) -> Result<&mut Self> {
        self.ensure_mutable()?;

        let mut selected: Vec<String> = Vec::with_capacity(fields.len() + 1);
        for field in fields {
            if !selected.iter().any(|f| f == field) {
                selected.push((*field).to_string());
            }
        }
        if !selected.is_empty() && !selected.iter().any(|f| f == SORT_PROPERTY) {
            selected.push(SORT_PROPERTY.to_string());
        }

        self.query.set_fields(selected);
        Ok(self)
    }

    /// Clear every clause, the field selection and the pagination state
    pub fn reset(&mut self) -> &mut Self {
        self.replace_query(Query::new());
        self
    }

    pub(crate) fn replace_query(&mut self, query: Query) {
        self.query = query;
        self.paginator.reset();
    }

    /// Next matching product, `None` once every result has been delivered
    pub async fn next_product(&mut self) -> Result<Option<Product>> {
        self.paginator.next_product(&self.source, &self.query).await
    }

    /// Matching products as a stream
    ///
    /// The stream ends at exhaustion or right after the first error.
    pub fn stream(&mut self) -> impl Stream<Item = Result<Product>> + '_ {
        stream::try_unfold(self, |products| async move {
            products
                .next_product()
                .await
                .map(|next| next.map(|product| (product, products)))
        })
    }

    /// Drain up to `max` products, or all of them
    pub async fn collect_products(&mut self, max: Option<usize>) -> Result<Vec<Product>> {
        let mut collected = Vec::new();
        while max.map_or(true, |max| collected.len() < max) {
            match self.next_product().await? {
                Some(product) => collected.push(product),
                None => break,
            }
        }

        debug!(records = collected.len(), "collected products");
        Ok(collected)
    }

    /// Drain up to `max_rows` products into an Arrow record batch
    ///
    /// Returns `None` when nothing matched.
    pub async fn as_record_batch(&mut self, max_rows: Option<usize>) -> Result<Option<RecordBatch>> {
        let products = self.collect_products(max_rows).await?;
        if products.is_empty() {
            return Ok(None);
        }
        products_to_record_batch(&products).map(Some)
    }

    /// Refuse mutation mid-traversal
    ///
    /// An exhausted search accepts new clauses but stays exhausted; only
    /// [`reset`](Self::reset) starts another traversal.
    fn ensure_mutable(&self) -> Result<()> {
        if self.paginator.is_paginating() {
            return Err(Error::invalid_state(
                "cannot modify the query while results are being paginated; call reset() first",
            ));
        }
        Ok(())
    }
}

impl<S: ProductSource> QueryBuilder for Products<S> {
    fn add_clause(&mut self, clause: impl Into<String>) -> Result<&mut Self> {
        self.ensure_mutable()?;
        self.query.push(clause);
        Ok(self)
    }
}
