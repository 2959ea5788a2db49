//! HTTP client module
//!
//! Transport underneath the registry client.
//!
//! # Features
//!
//! - **Opt-in Retries**: Configurable retry logic with backoff, disabled by default
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
