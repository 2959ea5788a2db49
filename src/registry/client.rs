//! HTTP implementation of [`ProductSource`]

use super::types::{PageRequest, ProductPage, ProductSource};
use crate::config::RegistryConfig;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Path of the product search endpoint, relative to the base URL
const PRODUCTS_PATH: &str = "products";

/// Connection to the PDS Registry search API
///
/// Cheap to clone; clones share the underlying connection pool and rate
/// limiter.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: Arc<HttpClient>,
    base_url: String,
}

impl RegistryClient {
    /// Connect to the official production server
    pub fn new() -> Result<Self> {
        Self::from_config(&RegistryConfig::default())
    }

    /// Connect to another deployment of the search API
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(&RegistryConfig::default().with_base_url(base_url))
    }

    /// Build a client from a validated configuration
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(config.to_http_config())?;

        Ok(Self {
            http: Arc::new(http),
            base_url: config.base_url.clone(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ProductSource for RegistryClient {
    async fn product_list(&self, request: &PageRequest) -> Result<ProductPage> {
        debug!(
            q = request.q.as_deref().unwrap_or(""),
            search_after = ?request.search_after,
            "GET {}/{}",
            self.base_url,
            PRODUCTS_PATH
        );
        self.http
            .get_json_with_config(PRODUCTS_PATH, RequestConfig::from(request))
            .await
    }
}

impl From<&PageRequest> for RequestConfig {
    fn from(request: &PageRequest) -> Self {
        let mut config = RequestConfig::new()
            .header("Accept", "application/json")
            .query("sort", request.sort.join(","))
            .query("limit", request.limit.to_string());

        if let Some(q) = &request.q {
            config = config.query("q", q.as_str());
        }

        if let Some(search_after) = &request.search_after {
            config = config.query("search_after", search_after.join(","));
        }

        if !request.fields.is_empty() {
            config = config.query("fields", request.fields.join(","));
        }

        config
    }
}
