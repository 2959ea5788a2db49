// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # peppi
//!
//! Query builder and lazy paginator for the PDS Registry search API.
//!
//! ## Features
//!
//! - **Fluent Filters**: target, investigation, time range, collection,
//!   product class, instrument, processing level, lidvid, raw clauses
//! - **Cursor Pagination**: `search_after` on the harvest time, one page of
//!   100 products at a time, fetched only when needed
//! - **OSIRIS-REx**: mission-specific range and bounding-box filters
//! - **Arrow Output**: products as Arrow RecordBatches or Parquet files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use peppi::{Products, QueryBuilder, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut products = Products::connect()?;
//!     products
//!         .has_target("urn:nasa:pds:context:target:planet.mercury")?
//!         .observationals()?;
//!
//!     while let Some(product) = products.next_product().await? {
//!         println!("{} {:?}", product.id, product.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │            Products / OrexProducts (facades)             │
//! │   QueryBuilder predicates → next_product() / stream()    │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴─────────────┬───────────────┐
//! │    Query     │        Pagination         │    Output     │
//! ├──────────────┼───────────────────────────┼───────────────┤
//! │ Clauses      │ Fresh → Fetching → InPage │ Arrow         │
//! │ Fields       │ → Exhausted, search_after │ Parquet       │
//! └──────────────┴─────────────┬─────────────┴───────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────┐
//! │   RegistryClient (ProductSource) over HttpClient         │
//! │   GET {base_url}/products, rate limit, optional retry    │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with retry and rate limiting
pub mod http;

/// Client configuration
pub mod config;

/// Filter clauses and predicate builders
pub mod query;

/// Registry wire types and HTTP source
pub mod registry;

/// Cursor pagination state machine
pub mod pagination;

/// Search facades
pub mod products;

/// Arrow/Parquet output
pub mod output;

/// Command-line interface
pub mod cli;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{load_config, RegistryConfig};
pub use error::{Error, Result};
pub use pagination::{PaginationState, PAGE_SIZE, SORT_PROPERTY};
pub use products::{OrexProducts, Products};
pub use query::{ProcessingLevel, ProductClass, Query, QueryBuilder};
pub use registry::{Product, ProductSource, RegistryClient};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
