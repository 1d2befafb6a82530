//! Shared HTTP client construction policy.
//!
//! All service clients build their `reqwest::Client` here so they stay
//! consistent on timeouts, user-agent, and compression.

use std::time::Duration;

use reqwest::Client;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds an HTTP client with project-wide defaults.
///
/// Redirects follow reqwest's default policy (up to 10 hops), which the
/// shortened-URL expander relies on.
pub(crate) fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("wayback-utils/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(READ_TIMEOUT)
        .gzip(true)
        .build()
}
