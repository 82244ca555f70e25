//! HTTP Client Factory
//!
//! Provides a factory function for building the reqwest client shared by all
//! provider backends.

use std::time::Duration;

/// Upper bound on a single provider call. Dropping the generate future
/// aborts the request earlier; this is the backstop when nobody cancels.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Build a `reqwest::Client` with the gateway's request timeout.
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
