//! Registry module
//!
//! Transport between the paginator and the remote search service.
//!
//! # Overview
//!
//! The paginator only knows the [`ProductSource`] trait: hand it a
//! [`PageRequest`], get a [`ProductPage`] back. [`RegistryClient`] answers
//! those requests with `GET {base_url}/products`.

mod client;
mod types;

pub use client::RegistryClient;
pub use types::{PageRequest, PageSummary, Product, ProductPage, ProductSource};

#[cfg(test)]
mod tests;
