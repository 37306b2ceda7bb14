//! Client configuration
//!
//! # Examples
//!
//! ```rust
//! use hillfog_client::ClientConfig;
//!
//! let config = ClientConfig::new("http://hillfog.internal:8088")
//!     .with_timeout_ms(10_000)
//!     .with_session_cookie("JSESSIONID=abc123");
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8088";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Connection and paging settings for [`crate::HillfogClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend root, e.g. `http://localhost:8088`
    pub base_url: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Page size used when a caller does not pick one
    pub default_page_size: u32,

    /// Upper bound applied to every requested page size
    pub max_page_size: u32,

    /// Pre-seeded `Cookie` header (e.g. `JSESSIONID=...`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            default_page_size: hillfog_core::query::DEFAULT_PAGE_SIZE,
            max_page_size: hillfog_core::query::MAX_PAGE_SIZE,
            session_cookie: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_page_sizes(mut self, default_page_size: u32, max_page_size: u32) -> Self {
        self.default_page_size = default_page_size;
        self.max_page_size = max_page_size;
        self
    }

    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// `base_url` joined with an absolute action path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "base_url".to_string(),
            });
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidField {
                field: "base_url".to_string(),
                reason: format!("expected an http(s) URL, got {:?}", base_url),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidField {
                field: "timeout_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_page_size == 0 {
            return Err(ConfigError::InvalidField {
                field: "max_page_size".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::InvalidField {
                field: "default_page_size".to_string(),
                reason: format!("must be between 1 and {}", self.max_page_size),
            });
        }
        Ok(())
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing
    MissingField { field: String },
    /// A field is present but unusable
    InvalidField { field: String, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingField { field } => write!(f, "{} must be set", field),
            ConfigError::InvalidField { field, reason } => write!(f, "invalid {}: {}", field, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();

        assert_eq!(config.base_url, "http://localhost:8088");
        assert_eq!(config.timeout_ms, 30_000);
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.max_page_size, 100);
        assert!(config.session_cookie.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_url_join() {
        let config = ClientConfig::new("http://host:8088/hillfog/");
        assert_eq!(config.url("/kpi/query.action"), "http://host:8088/hillfog/kpi/query.action");
        assert_eq!(config.url("login.action"), "http://host:8088/hillfog/login.action");
    }

    #[test]
    fn test_validation_missing_base_url() {
        let config = ClientConfig::new("  ");
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingField {
                field: "base_url".to_string()
            })
        );
    }

    #[test]
    fn test_validation_rejects_non_http_url() {
        assert!(ClientConfig::new("ftp://host").validate().is_err());
    }

    #[test]
    fn test_validation_page_sizes() {
        assert!(ClientConfig::default().with_page_sizes(0, 100).validate().is_err());
        assert!(ClientConfig::default().with_page_sizes(50, 20).validate().is_err());
        assert!(ClientConfig::default().with_page_sizes(20, 50).validate().is_ok());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let err = ClientConfig::default().with_timeout_ms(0).validate().unwrap_err();
        assert!(err.to_string().contains("timeout_ms"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ClientConfig = serde_json::from_str(r#"{"base_url": "http://h:1"}"#).unwrap();
        assert_eq!(config.base_url, "http://h:1");
        assert_eq!(config.timeout_ms, 30_000);
    }
}
