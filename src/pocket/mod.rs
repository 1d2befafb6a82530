//! Pocket (read-it-later) API client.
//!
//! Covers the three operations the dedup reconciler needs: paginated
//! article listing (`/v3/get`), batched deletion and batched re-adding
//! (`/v3/send`). The [`BookmarkService`] trait is the seam higher layers
//! depend on, so reconciliation logic can be exercised against in-memory
//! fakes.
//!
//! API reference: <https://getpocket.com/developer/docs/overview>.

mod client;
mod error;

pub use client::PocketClient;
pub use error::PocketError;

use async_trait::async_trait;
use serde::Deserialize;

/// Page size for article listing requests.
///
/// A returned page smaller than this signals the listing is exhausted.
pub const PAGE_SIZE: usize = 5000;

/// Article state filter accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleState {
    /// Articles the user has archived.
    Archived,
    /// Articles still marked unread.
    Unread,
}

impl ArticleState {
    /// Value of the `state` field on the wire.
    #[must_use]
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Archived => "archive",
            Self::Unread => "unread",
        }
    }
}

/// One saved article as returned by the listing endpoint.
///
/// Owned by Pocket; this side only reads it and may ask for its deletion.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    /// Unique id of the saved item.
    pub item_id: String,
    /// URL as the user saved it.
    #[serde(default)]
    pub given_url: String,
    /// URL after Pocket's own redirect resolution.
    #[serde(default)]
    pub resolved_url: String,
}

/// Result of a batch delete call.
#[derive(Debug, Clone, Copy)]
pub struct BatchDeleteOutcome {
    /// Number of deletions requested.
    pub requested: usize,
    /// Number of deletions the service reported performing.
    pub performed: usize,
}

/// Operations the reconciler needs from a bookmarking service.
#[async_trait]
pub trait BookmarkService: Send + Sync {
    /// Lists one page of up to [`PAGE_SIZE`] articles in `state`, starting
    /// at `offset`.
    async fn list_articles(
        &self,
        state: ArticleState,
        offset: usize,
    ) -> Result<Vec<Article>, PocketError>;

    /// Deletes the given saved items in one batch call.
    async fn batch_delete(&self, item_ids: &[String]) -> Result<BatchDeleteOutcome, PocketError>;

    /// Re-adds the given URLs as saved items in one batch call.
    async fn batch_add(&self, urls: &[String]) -> Result<(), PocketError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_state_wire_values() {
        assert_eq!(ArticleState::Archived.as_query(), "archive");
        assert_eq!(ArticleState::Unread.as_query(), "unread");
    }
}
