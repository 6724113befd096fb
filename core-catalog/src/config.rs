//! # Catalog Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{CatalogError, Result};

/// Catalog API and delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the catalog REST API.
    pub api_base_url: String,

    /// Base URL of the CDN serving media objects. When set, a record's
    /// `media_key` can be joined onto it directly instead of requesting a
    /// delivery URL from the API.
    #[serde(default)]
    pub cdn_base_url: Option<String>,

    /// Maximum duration to wait for a catalog API response.
    ///
    /// Default: 10 seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,
}

impl CatalogConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            cdn_base_url: None,
            request_timeout: default_request_timeout(),
        }
    }

    pub fn with_cdn_base_url(mut self, url: impl Into<String>) -> Self {
        self.cdn_base_url = Some(url.into());
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(CatalogError::InvalidConfig(
                "api_base_url must not be empty".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(CatalogError::InvalidConfig(
                "request_timeout must be > 0".to_string(),
            ));
        }

        if let Some(cdn) = &self.cdn_base_url {
            if cdn.trim().is_empty() {
                return Err(CatalogError::InvalidConfig(
                    "cdn_base_url must not be empty when set".to_string(),
                ));
            }
        }

        Ok(())
    }
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}
