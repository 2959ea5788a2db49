//! Output module
//!
//! Tabular views of search results.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Converting products to Arrow RecordBatches
//! - Writing Parquet files

mod table;
mod writer;

pub use table::{products_schema, products_to_record_batch, ID_COLUMN};
pub use writer::{
    write_batch_to_parquet, write_products_to_parquet, ParquetWriter, ParquetWriterConfig,
};
