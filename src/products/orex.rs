//! OSIRIS-REx product search

use super::facade::Products;
use crate::error::{Error, Result};
use crate::pagination::{Cursor, PaginationState};
use crate::query::{Clause, Query, QueryBuilder, INVESTIGATION_FIELD};
use crate::registry::{Product, ProductSource, RegistryClient};
use arrow::record_batch::RecordBatch;
use futures::stream::Stream;

/// OSIRIS-REx investigation identifier
pub const OREX_INVESTIGATION: &str = "urn:nasa:pds:context:investigation:mission.orex";

/// Spacecraft distance to the target, in kilometres
pub const TARGET_RANGE_FIELD: &str = "orex:Spatial.orex:target_range";

/// Latitude of the observed point, in degrees
pub const LATITUDE_FIELD: &str = "orex:Spatial.orex:latitude";

/// Longitude of the observed point, in degrees
pub const LONGITUDE_FIELD: &str = "orex:Spatial.orex:longitude";

fn orex_query() -> Query {
    let mut query = Query::new();
    query.push(Clause::eq(INVESTIGATION_FIELD, OREX_INVESTIGATION));
    query
}

/// Search restricted to OSIRIS-REx products
///
/// Adds spatial predicates over the mission dictionary. The investigation
/// clause is always present, including after [`reset`](Self::reset).
#[derive(Debug)]
pub struct OrexProducts<S = RegistryClient> {
    inner: Products<S>,
}

impl OrexProducts<RegistryClient> {
    /// Search the official production registry
    pub fn connect() -> Result<Self> {
        Ok(Self::new(RegistryClient::new()?))
    }
}

impl<S: ProductSource> OrexProducts<S> {
    /// Create a search backed by `source`
    pub fn new(source: S) -> Self {
        Self {
            inner: Products::with_query(source, orex_query()),
        }
    }

    /// Products observed with the spacecraft at most `km` from the target
    pub fn within_range(&mut self, km: f64) -> Result<&mut Self> {
        self.add_clause(Clause::le(TARGET_RANGE_FIELD, km))
    }

    /// Products whose observed point lies within a latitude/longitude box
    pub fn within_bbox(
        &mut self,
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
    ) -> Result<&mut Self> {
        self.add_clause(Clause::ge(LATITUDE_FIELD, lat_min))?
            .add_clause(Clause::le(LATITUDE_FIELD, lat_max))?
            .add_clause(Clause::ge(LONGITUDE_FIELD, lon_min))?
            .add_clause(Clause::le(LONGITUDE_FIELD, lon_max))
    }

    /// See [`Products::fields`]
    pub fn fields(&mut self, fields: &[&str]) -> Result<&mut Self> {
        self.inner.fields(fields)?;
        Ok(self)
    }

    /// Clear the user clauses, keeping the investigation filter
    pub fn reset(&mut self) -> &mut Self {
        self.inner.replace_query(orex_query());
        self
    }

    /// See [`Products::source`]
    pub fn source(&self) -> &S {
        self.inner.source()
    }

    /// See [`Products::query`]
    pub fn query(&self) -> &Query {
        self.inner.query()
    }

    /// See [`Products::state`]
    pub fn state(&self) -> PaginationState {
        self.inner.state()
    }

    /// See [`Products::cursor`]
    pub fn cursor(&self) -> &Cursor {
        self.inner.cursor()
    }

    /// See [`Products::is_paginating`]
    pub fn is_paginating(&self) -> bool {
        self.inner.is_paginating()
    }

    /// See [`Products::next_product`]
    pub async fn next_product(&mut self) -> Result<Option<Product>> {
        self.inner.next_product().await
    }

    /// See [`Products::stream`]
    pub fn stream(&mut self) -> impl Stream<Item = Result<Product>> + '_ {
        self.inner.stream()
    }

    /// See [`Products::collect_products`]
    pub async fn collect_products(&mut self, max: Option<usize>) -> Result<Vec<Product>> {
        self.inner.collect_products(max).await
    }

    /// See [`Products::as_record_batch`]
    pub async fn as_record_batch(&mut self, max_rows: Option<usize>) -> Result<Option<RecordBatch>> {
        self.inner.as_record_batch(max_rows).await
    }
}

impl<S: ProductSource> QueryBuilder for OrexProducts<S> {
    fn add_clause(&mut self, clause: impl Into<String>) -> Result<&mut Self> {
        self.inner.add_clause(clause)?;
        Ok(self)
    }

    /// Always fails: the investigation is fixed to OSIRIS-REx
    fn has_investigation(&mut self, _identifier: &str) -> Result<&mut Self> {
        Err(Error::unsupported(
            "the investigation of an OSIRIS-REx search cannot be changed",
        ))
    }
}
