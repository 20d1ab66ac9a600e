//! HTTP client module
//!
//! Provides the JSON POST client used to reach the ledger's JSON-RPC
//! endpoint.
//!
//! # Features
//!
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Failure Classification**: Timeouts, non-2xx statuses and malformed
//!   bodies all surface as transport errors

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
