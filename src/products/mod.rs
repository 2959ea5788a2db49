//! Products module
//!
//! User-facing search handles tying a [`Query`](crate::query::Query) to a
//! [`ProductPaginator`](crate::pagination::ProductPaginator).
//!
//! # Overview
//!
//! - [`Products`]: every product of the registry
//! - [`OrexProducts`]: OSIRIS-REx products, with spatial predicates
//!
//! Both refuse new clauses while their results are being paginated.

mod facade;
mod orex;

pub use facade::Products;
pub use orex::{
    OrexProducts, LATITUDE_FIELD, LONGITUDE_FIELD, OREX_INVESTIGATION, TARGET_RANGE_FIELD,
};
