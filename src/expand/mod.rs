//! Shortened-URL expansion via redirect following.
//!
//! Medium's share links (`link.medium.com`) are opaque redirectors; the
//! reconciler replaces them with the canonical article URL. Expansion
//! issues a GET, lets the HTTP layer follow redirects, and reports the
//! final response URL with its tracking suffix stripped.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::http;
use crate::urls::normalize_url;

/// Host prefix identifying a shortened Medium URL.
pub const MEDIUM_SHORT_PREFIX: &str = "link.medium.com";

/// Errors that can occur while expanding a shortened URL.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// HTTP client construction failed.
    #[error("failed to build expansion HTTP client: {source}")]
    Client {
        /// Underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// The candidate is not a parseable absolute URL.
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        /// The rejected candidate.
        url: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// Network-level failure following the redirect chain.
    #[error("failed to expand {url}: {source}")]
    Request {
        /// The URL being expanded.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
}

/// Resolves a shortened URL to its canonical long form.
#[async_trait]
pub trait UrlExpander: Send + Sync {
    /// Expands `url` to its canonical form.
    async fn expand(&self, url: &str) -> Result<String, ExpandError>;
}

/// Expander that follows the redirect chain with a GET request.
#[derive(Debug, Clone)]
pub struct RedirectExpander {
    http: reqwest::Client,
}

impl RedirectExpander {
    /// Creates an expander with the project HTTP defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandError::Client`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ExpandError> {
        let http = http::build_client().map_err(|source| ExpandError::Client { source })?;
        Ok(Self { http })
    }
}

#[async_trait]
impl UrlExpander for RedirectExpander {
    #[instrument(skip(self))]
    async fn expand(&self, url: &str) -> Result<String, ExpandError> {
        let parsed = Url::parse(url).map_err(|source| ExpandError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let response = self
            .http
            .get(parsed)
            .send()
            .await
            .map_err(|source| ExpandError::Request {
                url: url.to_string(),
                source,
            })?;

        let expanded = normalize_url(response.url().as_str());
        debug!(expanded = %expanded, "expanded shortened url");
        Ok(expanded)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_expand_rejects_relative_url() {
        let expander = RedirectExpander::new().expect("client builds");
        let result = expander.expand("not-a-url").await;
        assert!(matches!(result, Err(ExpandError::InvalidUrl { .. })));
    }
}
