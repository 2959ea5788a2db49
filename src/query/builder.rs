//! Fluent predicate methods
//!
//! Every predicate composes one clause and hands it to
//! [`QueryBuilder::add_clause`], which decides whether mutation is currently
//! allowed. Methods return the same handle so calls chain with `?`:
//!
//! ```rust,ignore
//! products
//!     .has_target("urn:nasa:pds:context:target:planet.mercury")?
//!     .before(&cutoff)?
//!     .observationals()?;
//! ```

use super::types::{
    iso8601_utc, Clause, ProcessingLevel, ProductClass, COLLECTION_TYPE_FIELD,
    INSTRUMENT_FIELD, INSTRUMENT_HOST_FIELD, INVESTIGATION_FIELD, LIDVID_FIELD,
    PARENT_COLLECTION_FIELD, PROCESSING_LEVEL_FIELD, PRODUCT_CLASS_FIELD, START_TIME_FIELD,
    STOP_TIME_FIELD, TARGET_FIELD,
};
use crate::error::Result;
use chrono::{DateTime, TimeZone};

/// Filter predicates shared by every product facade
pub trait QueryBuilder: Sized {
    /// Append a clause, AND-ed with the existing ones
    ///
    /// Fails with [`Error::InvalidState`](crate::Error::InvalidState) while
    /// a previous query is still being paginated.
    fn add_clause(&mut self, clause: impl Into<String>) -> Result<&mut Self>;

    /// Products having the given target
    fn has_target(&mut self, identifier: &str) -> Result<&mut Self> {
        self.add_clause(Clause::eq(TARGET_FIELD, identifier))
    }

    /// Products having the given investigation
    fn has_investigation(&mut self, identifier: &str) -> Result<&mut Self> {
        self.add_clause(Clause::eq(INVESTIGATION_FIELD, identifier))
    }

    /// Products whose start time is at or before `datetime`
    fn before<Tz: TimeZone>(&mut self, datetime: &DateTime<Tz>) -> Result<&mut Self> {
        self.add_clause(Clause::le(START_TIME_FIELD, iso8601_utc(datetime)))
    }

    /// Products whose stop time is at or after `datetime`
    fn after<Tz: TimeZone>(&mut self, datetime: &DateTime<Tz>) -> Result<&mut Self> {
        self.add_clause(Clause::ge(STOP_TIME_FIELD, iso8601_utc(datetime)))
    }

    /// Products belonging to a collection
    fn of_collection(&mut self, identifier: &str) -> Result<&mut Self> {
        self.add_clause(Clause::eq(PARENT_COLLECTION_FIELD, identifier))
    }

    /// Products of a given class
    fn of_class(&mut self, class: ProductClass) -> Result<&mut Self> {
        self.add_clause(Clause::eq(PRODUCT_CLASS_FIELD, class.as_str()))
    }

    /// Observational products
    fn observationals(&mut self) -> Result<&mut Self> {
        self.of_class(ProductClass::Observational)
    }

    /// Collection products, optionally of a given collection type
    fn collections(&mut self, collection_type: Option<&str>) -> Result<&mut Self> {
        self.of_class(ProductClass::Collection)?;
        if let Some(collection_type) = collection_type {
            self.add_clause(Clause::eq(COLLECTION_TYPE_FIELD, collection_type))?;
        }
        Ok(self)
    }

    /// Bundle products
    fn bundles(&mut self) -> Result<&mut Self> {
        self.of_class(ProductClass::Bundle)
    }

    /// Products acquired by an instrument
    fn has_instrument(&mut self, identifier: &str) -> Result<&mut Self> {
        self.add_clause(Clause::eq(INSTRUMENT_FIELD, identifier))
    }

    /// Products acquired from an instrument host (spacecraft, rover, ...)
    fn has_instrument_host(&mut self, identifier: &str) -> Result<&mut Self> {
        self.add_clause(Clause::eq(INSTRUMENT_HOST_FIELD, identifier))
    }

    /// Products at a processing level
    fn has_processing_level(&mut self, level: ProcessingLevel) -> Result<&mut Self> {
        self.add_clause(Clause::eq(PROCESSING_LEVEL_FIELD, level.title()))
    }

    /// Products whose lidvid matches `identifier`
    fn get(&mut self, identifier: &str) -> Result<&mut Self> {
        self.add_clause(Clause::like(LIDVID_FIELD, identifier))
    }

    /// Products matching a raw clause in the service's filter syntax
    fn filter(&mut self, clause: &str) -> Result<&mut Self> {
        self.add_clause(clause)
    }
}
