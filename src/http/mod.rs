//! HTTP transport module
//!
//! The transport beneath every page fetch. Retry and throttling live here,
//! never in the pagination driver.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Service Errors**: AWS JSON error bodies decoded into `Error::Remote`

mod client;
mod rate_limit;

pub use client::{
    decode_service_error, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
