//! Query module
//!
//! Builds the filter expression sent as the `q` parameter.
//!
//! # Overview
//!
//! A [`Query`] is an ordered conjunction of parenthesized clauses. The
//! [`QueryBuilder`] trait supplies the predicate vocabulary (target,
//! investigation, time range, collection, class, instrument, processing
//! level, identifier, free-form) on top of a single `add_clause` hook that
//! each facade implements.

mod builder;
mod types;

pub use builder::QueryBuilder;
pub use types::{
    iso8601_utc, Clause, Literal, Operator, ProcessingLevel, ProductClass, Query,
    COLLECTION_TYPE_FIELD, INSTRUMENT_FIELD, INSTRUMENT_HOST_FIELD, INVESTIGATION_FIELD,
    LIDVID_FIELD, PARENT_COLLECTION_FIELD, PROCESSING_LEVEL_FIELD, PRODUCT_CLASS_FIELD,
    START_TIME_FIELD, STOP_TIME_FIELD, TARGET_FIELD,
};
