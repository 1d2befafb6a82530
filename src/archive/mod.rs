//! Wayback Machine client: snapshot availability checks and save requests.
//!
//! Two endpoints are involved: the availability API
//! (`http://archive.org/wayback/available`) to ask whether a snapshot
//! already exists, and the save endpoint (`https://web.archive.org/save`)
//! to request one. The [`ArchiveService`] trait is the seam the submission
//! engine depends on.
//!
//! The service enforces a request-rate ceiling of roughly 15 requests per
//! minute; pacing is the caller's job (see [`crate::submit`]).

mod error;

pub use error::ArchiveError;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::http;

const DEFAULT_AVAILABILITY_BASE_URL: &str = "http://archive.org";
const DEFAULT_SAVE_BASE_URL: &str = "https://web.archive.org";

/// Operations the submission engine needs from a web-archiving service.
#[async_trait]
pub trait ArchiveService: Send + Sync {
    /// Returns whether a snapshot of `url` already exists.
    async fn check_archived(&self, url: &str) -> Result<bool, ArchiveError>;

    /// Requests a fresh snapshot of `url`. Returns whether the service
    /// accepted the request.
    async fn submit(&self, url: &str) -> Result<bool, ArchiveError>;
}

/// HTTP client for the Wayback Machine.
#[derive(Debug, Clone)]
pub struct WaybackClient {
    http: reqwest::Client,
    availability_base_url: String,
    save_base_url: String,
}

impl WaybackClient {
    /// Creates a client against the production Wayback Machine endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Client`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ArchiveError> {
        Self::with_base_urls(DEFAULT_AVAILABILITY_BASE_URL, DEFAULT_SAVE_BASE_URL)
    }

    /// Creates a client against alternate endpoints (used by tests).
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Client`] if the HTTP client cannot be built.
    pub fn with_base_urls(
        availability_base_url: impl Into<String>,
        save_base_url: impl Into<String>,
    ) -> Result<Self, ArchiveError> {
        let http = http::build_client().map_err(|source| ArchiveError::Client { source })?;
        Ok(Self {
            http,
            availability_base_url: availability_base_url.into().trim_end_matches('/').to_string(),
            save_base_url: save_base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ArchiveService for WaybackClient {
    #[instrument(skip(self))]
    async fn check_archived(&self, url: &str) -> Result<bool, ArchiveError> {
        let response = self
            .http
            .get(format!("{}/wayback/available", self.availability_base_url))
            .query(&[("url", url)])
            .send()
            .await
            .map_err(|source| ArchiveError::Check {
                url: url.to_string(),
                source,
            })?;

        let availability: AvailabilityResponse =
            response
                .json()
                .await
                .map_err(|source| ArchiveError::Decode {
                    url: url.to_string(),
                    source,
                })?;

        let archived = !availability.archived_snapshots.is_empty();
        debug!(archived, "availability check complete");
        Ok(archived)
    }

    #[instrument(skip(self))]
    async fn submit(&self, url: &str) -> Result<bool, ArchiveError> {
        let response = self
            .http
            .post(format!("{}/save", self.save_base_url))
            .form(&[("url", url)])
            .send()
            .await
            .map_err(|source| ArchiveError::Submit {
                url: url.to_string(),
                source,
            })?;

        // The save endpoint signals acceptance purely via the status code.
        let accepted = response.status() == reqwest::StatusCode::OK;
        debug!(accepted, status = response.status().as_u16(), "save request complete");
        Ok(accepted)
    }
}

/// Response of the availability API. A URL counts as archived when
/// `archived_snapshots` is a non-empty object.
#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    archived_snapshots: HashMap<String, serde_json::Value>,
}
