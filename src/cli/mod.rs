//! CLI module
//!
//! Command-line interface for searching the registry.
//!
//! # Commands
//!
//! - `search` - Search all products
//! - `orex` - Search OSIRIS-REx products

mod commands;
mod runner;

pub use commands::{
    parse_bbox, parse_datetime, BoundingBox, Cli, Commands, OrexArgs, OutputArgs, OutputFormat,
    SearchArgs,
};
pub use runner::Runner;
