//! HTTP client module
//!
//! Transport for the search collaborator: retries, rate limiting, backoff
//! and credential injection. Retrying happens here and only here; the
//! paginator treats any error that escapes this layer as final.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
