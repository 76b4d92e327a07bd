//! Error types for batch-pager
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for batch-pager
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Remote Service Errors
    // ============================================================================
    #[error("{operation} failed ({status} {code}): {message}")]
    Remote {
        operation: String,
        status: u16,
        code: String,
        message: String,
    },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Invalid item budget {value}: must be at least 1")]
    InvalidBudget { value: u64 },

    #[error("Invalid page size {value}: must be within {min}..={max}")]
    InvalidPageSize { value: u64, min: u32, max: u32 },

    #[error("Operation cancelled")]
    Cancelled,

    // ============================================================================
    // State Errors
    // ============================================================================
    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a remote service error
    pub fn remote(
        operation: impl Into<String>,
        status: u16,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Remote {
            operation: operation.into(),
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Check if this error is retryable by the transport
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } | Error::Remote { status, .. } => {
                is_retryable_status(*status)
            }
            _ => false,
        }
    }

    /// Check if this error came from a failed page fetch
    ///
    /// Covers service-reported failures as well as transport failures
    /// (network, throttling, timeouts).
    pub fn is_remote_call(&self) -> bool {
        matches!(
            self,
            Error::Remote { .. }
                | Error::Http(_)
                | Error::HttpStatus { .. }
                | Error::Timeout { .. }
                | Error::MaxRetriesExceeded { .. }
        )
    }

    /// Service error code, when the service reported one
    pub fn service_code(&self) -> Option<&str> {
        match self {
            Error::Remote { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for batch-pager
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::remote("ListJobs", 400, "ClientException", "jobQueue not found");
        assert_eq!(
            err.to_string(),
            "ListJobs failed (400 ClientException): jobQueue not found"
        );

        let err = Error::InvalidPageSize {
            value: 0,
            min: 1,
            max: 100,
        };
        assert_eq!(err.to_string(), "Invalid page size 0: must be within 1..=100");
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(Error::http_status(429, "").is_retryable());
        assert!(Error::http_status(503, "").is_retryable());
        assert!(Error::remote("ListJobs", 500, "ServerException", "").is_retryable());

        assert!(!Error::http_status(400, "").is_retryable());
        assert!(!Error::remote("ListJobs", 400, "ClientException", "").is_retryable());
        assert!(!Error::config("test").is_retryable());
        assert!(!Error::Cancelled.is_retryable());
    }

    #[test]
    fn test_is_remote_call() {
        assert!(Error::remote("ListJobs", 400, "ClientException", "").is_remote_call());
        assert!(Error::http_status(502, "").is_remote_call());
        assert!(Error::Timeout { timeout_ms: 10 }.is_remote_call());

        assert!(!Error::Cancelled.is_remote_call());
        assert!(!Error::InvalidBudget { value: 0 }.is_remote_call());
        assert!(!Error::config("x").is_remote_call());
    }

    #[test]
    fn test_service_code() {
        let err = Error::remote("DescribeJobQueues", 403, "AccessDeniedException", "denied");
        assert_eq!(err.service_code(), Some("AccessDeniedException"));
        assert_eq!(Error::http_status(500, "").service_code(), None);
    }
}
