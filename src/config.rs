//! Runtime settings
//!
//! Settings are read from a YAML or JSON file and then overridden by
//! command-line flags. Every field has a default, so an empty file is a
//! valid configuration.

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, StringMap};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Settings
// ============================================================================

/// Complete settings for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Explicit service endpoint, overriding the regional one
    #[serde(default)]
    pub endpoint: Option<String>,

    /// AWS region used to build the regional endpoint
    #[serde(default = "default_region")]
    pub region: String,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Pagination defaults
    #[serde(default)]
    pub pagination: PaginationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: default_region(),
            http: HttpSettings::default(),
            pagination: PaginationSettings::default(),
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff
    #[serde(default)]
    pub backoff: BackoffSettings,

    /// Client-side request rate cap
    #[serde(default)]
    pub rate_limit_rps: Option<u32>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            backoff: BackoffSettings::default(),
            rate_limit_rps: None,
            user_agent: None,
            headers: StringMap::new(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffSettings {
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

impl Default for BackoffSettings {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    20_000
}

// ============================================================================
// Pagination Settings
// ============================================================================

/// Pagination defaults applied when the command line gives none
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationSettings {
    /// Item budget for every run
    #[serde(default)]
    pub default_max_items: Option<u64>,
}

// ============================================================================
// Loading
// ============================================================================

impl Settings {
    /// Load settings from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let settings = match extension.as_deref() {
            Some("json") => Self::from_json(&content)?,
            Some("yaml" | "yml") => Self::from_yaml(&content)?,
            _ => {
                return Err(Error::config(format!(
                    "Unsupported settings file '{}': expected .yaml, .yml or .json",
                    path.display()
                )))
            }
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty YAML document parses as null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse settings from JSON
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Check the settings for values that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(Error::invalid_value("region", "must not be empty"));
        }

        if self.pagination.default_max_items == Some(0) {
            return Err(Error::invalid_value(
                "pagination.default_max_items",
                "must be at least 1",
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value("http.timeout_secs", "must be at least 1"));
        }

        self.endpoint_url()?;
        Ok(())
    }

    /// The endpoint requests are sent to
    pub fn effective_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://batch.{}.amazonaws.com", self.region),
        }
    }

    /// The endpoint, parsed
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.effective_endpoint())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(url)
    }

    // ========================================================================
    // Overrides
    // ========================================================================

    /// Override the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if endpoint.is_some() {
            self.endpoint = endpoint;
        }
        self
    }

    /// Override the region
    #[must_use]
    pub fn with_region(mut self, region: Option<String>) -> Self {
        if let Some(region) = region {
            self.region = region;
        }
        self
    }

    /// Build the HTTP client configuration
    pub fn http_client_config(&self) -> Result<HttpClientConfig> {
        let endpoint = self.endpoint_url()?;

        let mut builder = HttpClientConfig::builder()
            .base_url(endpoint.as_str().trim_end_matches('/'))
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.backoff.backoff_type,
                Duration::from_millis(self.http.backoff.initial_ms),
                Duration::from_millis(self.http.backoff.max_ms),
            );

        builder = match self.http.rate_limit_rps {
            Some(rps) => builder.rate_limit(RateLimiterConfig::per_second(rps)),
            None => builder.no_rate_limit(),
        };

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        for (key, value) in &self.http.headers {
            builder = builder.header(key.clone(), value.clone());
        }

        Ok(builder.build())
    }
}
