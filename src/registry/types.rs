//! Registry wire types and the page source trait
//!
//! Mirrors the `application/json` representation returned by the
//! `/products` endpoint of the PDS search API.

use crate::error::Result;
use crate::pagination::SORT_PROPERTY;
use crate::types::PropertyMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ============================================================================
// Product
// ============================================================================

/// A single product record returned by the registry
///
/// Only the harvest time property is ever read by the paginator; everything
/// else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Product {
    /// Product lidvid
    #[serde(default)]
    pub id: String,

    /// Product title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Product class, e.g. `Product_Observational`
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_type: Option<String>,

    /// Observation start time (ISO-8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_time: Option<String>,

    /// Observation stop time (ISO-8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_date_time: Option<String>,

    /// All harvested properties
    #[serde(default)]
    pub properties: PropertyMap,
}

impl Product {
    /// All values of a property
    pub fn property(&self, name: &str) -> Option<&[String]> {
        self.properties.get(name).map(Vec::as_slice)
    }

    /// First value of a property
    pub fn first(&self, name: &str) -> Option<&str> {
        self.property(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Whether a property carries the given value
    pub fn has_value(&self, name: &str, value: &str) -> bool {
        self.property(name)
            .is_some_and(|values| values.iter().any(|v| v == value))
    }

    /// The harvest time used as the pagination cursor
    pub fn harvest_time(&self) -> Option<&str> {
        self.first(SORT_PROPERTY)
    }
}

// ============================================================================
// Page
// ============================================================================

/// Summary block of a `/products` response
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageSummary {
    /// Total number of products matching the query
    #[serde(default)]
    pub hits: u64,

    /// Query echoed back by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Server-side processing time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub took: Option<u64>,
}

/// One page of products
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductPage {
    /// Hit count summary (only trusted on the first page)
    #[serde(default)]
    pub summary: PageSummary,

    /// Products in sort order
    #[serde(default)]
    pub data: Vec<Product>,
}

impl ProductPage {
    /// Create a page from a hit count and its records
    pub fn new(hits: u64, data: Vec<Product>) -> Self {
        Self {
            summary: PageSummary {
                hits,
                ..PageSummary::default()
            },
            data,
        }
    }
}

// ============================================================================
// Request
// ============================================================================

/// Parameters of a single page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Filter expression, `None` when no clause was added
    pub q: Option<String>,
    /// Sort properties
    pub sort: Vec<String>,
    /// Page size
    pub limit: u32,
    /// Sort values of the last delivered record, `None` on the first page
    pub search_after: Option<Vec<String>>,
    /// Properties to return, empty for all
    pub fields: Vec<String>,
}

// ============================================================================
// Source Trait
// ============================================================================

/// Anything able to answer a page request
///
/// Implemented by [`RegistryClient`](super::RegistryClient) over HTTP; tests
/// and embedders can supply their own.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch one page of products
    async fn product_list(&self, request: &PageRequest) -> Result<ProductPage>;
}
