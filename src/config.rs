//! Registry client configuration
//!
//! Settings for reaching the PDS search API, loadable from a YAML (or JSON)
//! file. Every field has a default, so an empty document is a valid config
//! pointing at the public production service.
//!
//! ```yaml
//! base_url: https://pds.nasa.gov/api/search/1
//! timeout_seconds: 30
//! max_retries: 0
//! backoff:
//!   type: exponential
//!   initial_ms: 250
//!   max_ms: 30000
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 5
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default URL used when querying the PDS API
pub const DEFAULT_API_BASE_URL: &str = "https://pds.nasa.gov/api/search/1";

// ============================================================================
// Registry Config
// ============================================================================

/// Connection settings for the PDS Registry search API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL of the search API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Transport-level retries for a single page request
    #[serde(default)]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub backoff: BackoffConfig,

    /// Client-side throttling; `null` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Override for the User-Agent header
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            max_retries: 0,
            backoff: BackoffConfig::default(),
            rate_limit: default_rate_limit(),
            user_agent: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

impl RegistryConfig {
    /// Replace the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Check the settings before a client is built from them
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(Error::invalid_config(
                "timeout_seconds",
                "must be greater than zero",
            ));
        }

        if self.backoff.initial_ms > self.backoff.max_ms {
            return Err(Error::invalid_config(
                "backoff",
                "initial_ms cannot exceed max_ms",
            ));
        }

        Ok(())
    }

    /// Build the transport configuration
    pub fn to_http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.as_str())
            .timeout(Duration::from_secs(self.timeout_seconds))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff.backoff_type,
                Duration::from_millis(self.backoff.initial_ms),
                Duration::from_millis(self.backoff.max_ms),
            );

        builder = match &self.rate_limit {
            Some(rate_limit) => builder.rate_limit(rate_limit.clone()),
            None => builder.no_rate_limit(),
        };

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.as_str());
        }

        builder.build()
    }
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    250
}

fn default_max_ms() -> u64 {
    30_000
}

// ============================================================================
// Loading
// ============================================================================

/// Load a registry config from a YAML or JSON file
pub fn load_config(path: impl AsRef<Path>) -> Result<RegistryConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_config_from_str(&content)
}

/// Load a registry config from a YAML (or JSON) string
pub fn load_config_from_str(content: &str) -> Result<RegistryConfig> {
    let config: RegistryConfig = if content.trim().is_empty() {
        RegistryConfig::default()
    } else {
        serde_yaml::from_str(content)?
    };

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(config.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.rate_limit, Some(RateLimiterConfig::default()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_load_yaml() {
        let yaml = r"
base_url: http://localhost:8080/api/search/1
timeout_seconds: 5
max_retries: 2
backoff:
  type: linear
  initial_ms: 10
  max_ms: 100
rate_limit: null
user_agent: my-agent/2.0
";
        let config = load_config_from_str(yaml).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/api/search/1");
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.backoff.backoff_type, BackoffType::Linear);
        assert!(config.rate_limit.is_none());
        assert_eq!(config.user_agent.as_deref(), Some("my-agent/2.0"));
    }

    #[test]
    fn test_load_json() {
        let json = r#"{"base_url": "https://pds.example.org/api/search/1", "max_retries": 1}"#;
        let config = load_config_from_str(json).unwrap();
        assert_eq!(config.base_url, "https://pds.example.org/api/search/1");
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_invalid_url_rejected() {
        let err = load_config_from_str("base_url: not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = load_config_from_str("base_url: ftp://pds.nasa.gov/api").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "base_url"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = load_config_from_str("timeout_seconds: 0").unwrap_err();
        assert!(
            matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "timeout_seconds")
        );
    }

    #[test]
    fn test_to_http_config() {
        let config = RegistryConfig {
            max_retries: 3,
            rate_limit: None,
            user_agent: Some("agent/1".to_string()),
            ..RegistryConfig::default()
        };

        let http = config.to_http_config();
        assert_eq!(http.base_url.as_deref(), Some(DEFAULT_API_BASE_URL));
        assert_eq!(http.max_retries, 3);
        assert_eq!(http.timeout, Duration::from_secs(30));
        assert_eq!(http.initial_backoff, Duration::from_millis(250));
        assert!(http.rate_limit.is_none());
        assert_eq!(http.user_agent, "agent/1");
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_seconds: 12").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.timeout_seconds, 12);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
