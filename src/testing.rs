//! In-memory registry used by unit tests

use crate::error::{Error, Result};
use crate::pagination::SORT_PROPERTY;
use crate::registry::{PageRequest, Product, ProductPage, ProductSource};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

/// Build a product whose harvest time grows with `index`
pub(crate) fn product(index: usize) -> Product {
    let harvested = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        + Duration::seconds(index as i64);
    let mut properties = BTreeMap::new();
    properties.insert(
        SORT_PROPERTY.to_string(),
        vec![harvested.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)],
    );
    properties.insert(
        "ref_lid_target".to_string(),
        vec!["urn:nasa:pds:context:target:planet.mercury".to_string()],
    );

    Product {
        id: format!("urn:nasa:pds:test:data:p{index:05}::1.0"),
        properties,
        ..Product::default()
    }
}

#[derive(Debug, Default)]
struct Inner {
    products: Vec<Product>,
    reported_hits: Option<u64>,
    failing_calls: Mutex<HashSet<usize>>,
    requests: Mutex<Vec<PageRequest>>,
}

/// Registry that honours `search_after` and `limit` over a fixed product list
///
/// Clones share the same request log.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeRegistry {
    inner: Arc<Inner>,
}

impl FakeRegistry {
    pub(crate) fn with_products(count: usize) -> Self {
        Self::from_products((0..count).map(product).collect())
    }

    pub(crate) fn from_products(products: Vec<Product>) -> Self {
        Self {
            inner: Arc::new(Inner {
                products,
                ..Inner::default()
            }),
        }
    }

    /// Report `hits` in the summary instead of the real product count
    pub(crate) fn reporting_hits(self, hits: u64) -> Self {
        let inner = Arc::try_unwrap(self.inner).unwrap_or_else(|_| panic!("shared registry"));
        Self {
            inner: Arc::new(Inner {
                reported_hits: Some(hits),
                ..inner
            }),
        }
    }

    /// Make the `call`-th request (zero based) fail once with a 503
    pub(crate) fn failing_call(self, call: usize) -> Self {
        self.inner.failing_calls.lock().unwrap().insert(call);
        self
    }

    pub(crate) fn requests(&self) -> Vec<PageRequest> {
        self.inner.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductSource for FakeRegistry {
    async fn product_list(&self, request: &PageRequest) -> Result<ProductPage> {
        let call = {
            let mut requests = self.inner.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };

        if self.inner.failing_calls.lock().unwrap().remove(&call) {
            return Err(Error::http_status(503, "Service Unavailable"));
        }

        let after = request
            .search_after
            .as_ref()
            .and_then(|values| values.first().cloned());
        let data: Vec<Product> = self
            .inner
            .products
            .iter()
            .filter(|p| match (&after, p.harvest_time()) {
                (Some(after), Some(time)) => time > after.as_str(),
                _ => true,
            })
            .take(request.limit as usize)
            .cloned()
            .collect();

        let hits = self
            .inner
            .reported_hits
            .unwrap_or(self.inner.products.len() as u64);
        Ok(ProductPage::new(hits, data))
    }
}
