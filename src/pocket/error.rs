//! Error types for Pocket API operations.

use thiserror::Error;

/// Errors that can occur while talking to the Pocket API.
#[derive(Debug, Error)]
pub enum PocketError {
    /// HTTP client construction failed.
    #[error("failed to build Pocket HTTP client: {source}")]
    Client {
        /// Underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Network-level failure sending a request.
    #[error("Pocket request to {endpoint} failed: {source}")]
    Request {
        /// API endpoint path.
        endpoint: &'static str,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Pocket answered with a non-success HTTP status.
    #[error("Pocket returned HTTP {status} from {endpoint}")]
    Status {
        /// API endpoint path.
        endpoint: &'static str,
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("failed to decode Pocket response from {endpoint}: {source}")]
    Decode {
        /// API endpoint path.
        endpoint: &'static str,
        /// Underlying decode error.
        #[source]
        source: reqwest::Error,
    },
}
