//! Error types for Wayback Machine operations.

use thiserror::Error;

/// Errors that can occur while talking to the Wayback Machine.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// HTTP client construction failed.
    #[error("failed to build Wayback HTTP client: {source}")]
    Client {
        /// Underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level failure checking a URL's archive status.
    #[error("availability check failed for {url}: {source}")]
    Check {
        /// The URL being checked.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The availability response could not be decoded.
    #[error("failed to decode availability response for {url}: {source}")]
    Decode {
        /// The URL being checked.
        url: String,
        /// Underlying decode error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level failure submitting a URL for archiving.
    #[error("save request failed for {url}: {source}")]
    Submit {
        /// The URL being submitted.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
}
