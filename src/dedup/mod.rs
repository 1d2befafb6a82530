//! Dedup reconciler for saved Pocket articles.
//!
//! Reconciles the archived and unread article sets: normalizes URLs,
//! detects duplicates (including a shortened Medium link coexisting with
//! its expanded form), deletes redundant entries remotely in one batch,
//! re-adds canonical URLs for the shortened ones, and merges the surviving
//! URL set into the persisted submission queue.
//!
//! Archived articles are processed first so that when a duplicate spans
//! both states, the archived copy is the one kept.

use std::collections::HashSet;

use futures_util::StreamExt;
use thiserror::Error;
use tracing::{info, warn};

use crate::expand::{MEDIUM_SHORT_PREFIX, UrlExpander};
use crate::pocket::{Article, ArticleState, BookmarkService, PAGE_SIZE, PocketError};
use crate::store::{StoreError, UrlSetFile};
use crate::urls::normalize_url;

/// Concurrent in-flight expansion requests.
///
/// Expansion is I/O-bound against a single host; a small fixed bound is
/// enough and keeps the redirector from throttling us.
const EXPANSION_CONCURRENCY: usize = 8;

/// Errors that abort a reconciliation run.
///
/// Anything that would let a partial duplicate list reach the batch delete
/// call, or leave local state diverged from the remote service, is fatal.
/// Per-candidate expansion failures are contained and only logged.
#[derive(Debug, Error)]
pub enum DedupError {
    /// A Pocket call (listing or batch mutation) failed.
    #[error(transparent)]
    Pocket(#[from] PocketError),

    /// The to-submit set could not be read or persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Counts reported by one reconciliation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DedupOutcome {
    /// Distinct normalized URLs kept across both article states.
    pub kept: usize,
    /// Deletions requested from the service.
    pub deleted_requested: usize,
    /// Deletions the service reported performing.
    pub deleted_performed: usize,
    /// Canonical URLs re-added in place of shortened ones.
    pub readded: usize,
    /// Size of the persisted to-submit set after the merge.
    pub queued: usize,
}

/// Reconciles remote article state and feeds the submission queue.
pub struct Reconciler<'a> {
    pocket: &'a dyn BookmarkService,
    expander: &'a dyn UrlExpander,
    to_submit: &'a UrlSetFile,
}

impl<'a> Reconciler<'a> {
    /// Creates a reconciler over the given service clients and queue store.
    pub fn new(
        pocket: &'a dyn BookmarkService,
        expander: &'a dyn UrlExpander,
        to_submit: &'a UrlSetFile,
    ) -> Self {
        Self {
            pocket,
            expander,
            to_submit,
        }
    }

    /// Runs one full reconciliation pass.
    ///
    /// # Errors
    ///
    /// Returns [`DedupError`] when a paginated fetch, a batch mutation, or
    /// queue persistence fails. No batch delete or add is dispatched if the
    /// duplicate list could be incomplete.
    pub async fn reconcile(&self) -> Result<DedupOutcome, DedupError> {
        let mut unique_urls: HashSet<String> = HashSet::new();
        let mut duplicate_ids: Vec<String> = Vec::new();
        let mut expansion_candidates: HashSet<String> = HashSet::new();

        info!("retrieving archived articles");
        let archived = self.fetch_all(ArticleState::Archived).await?;
        info!(count = archived.len(), "retrieved archived articles");

        for article in &archived {
            let url = normalize_url(&article.given_url);
            if !unique_urls.insert(url) {
                duplicate_ids.push(article.item_id.clone());
            }
        }

        info!("retrieving unread articles");
        let unread = self.fetch_all(ArticleState::Unread).await?;
        info!(count = unread.len(), "retrieved unread articles");

        for article in &unread {
            let url = normalize_url(&article.given_url);
            if url.contains(MEDIUM_SHORT_PREFIX) {
                // Delete the shortened entry no matter what; its canonical
                // form is re-added after expansion.
                duplicate_ids.push(article.item_id.clone());
                if article.resolved_url.is_empty() {
                    warn!(
                        item_id = %article.item_id,
                        "shortened article has no resolved url, nothing to re-add"
                    );
                } else {
                    expansion_candidates.insert(article.resolved_url.clone());
                }
            } else if !unique_urls.insert(url) {
                duplicate_ids.push(article.item_id.clone());
            }
        }

        let expanded = self.expand_candidates(expansion_candidates).await;

        let (deleted_requested, deleted_performed) = if duplicate_ids.is_empty() {
            info!("no duplicate articles");
            (0, 0)
        } else {
            info!(count = duplicate_ids.len(), "deleting duplicate articles");
            let outcome = self.pocket.batch_delete(&duplicate_ids).await?;
            if outcome.performed != outcome.requested {
                warn!(
                    requested = outcome.requested,
                    performed = outcome.performed,
                    "service deleted fewer articles than requested"
                );
            }
            (outcome.requested, outcome.performed)
        };

        let readded = if expanded.is_empty() {
            info!("no shortened urls needing expansion");
            0
        } else {
            info!(count = expanded.len(), "re-adding expanded urls");
            let urls: Vec<String> = expanded.iter().cloned().collect();
            self.pocket.batch_add(&urls).await?;
            urls.len()
        };

        let kept = unique_urls.len();
        let mut queue = self.to_submit.load()?;
        queue.extend(unique_urls);
        queue.extend(expanded);
        self.to_submit.save(&queue)?;

        let outcome = DedupOutcome {
            kept,
            deleted_requested,
            deleted_performed,
            readded,
            queued: queue.len(),
        };
        info!(
            kept = outcome.kept,
            deleted = outcome.deleted_performed,
            readded = outcome.readded,
            queued = outcome.queued,
            "reconciliation complete"
        );
        Ok(outcome)
    }

    /// Pages through every article in `state`.
    ///
    /// A page shorter than [`PAGE_SIZE`] signals exhaustion. Any page
    /// failure aborts the run; deduplicating against a truncated listing
    /// would mark the wrong articles for deletion.
    async fn fetch_all(&self, state: ArticleState) -> Result<Vec<Article>, PocketError> {
        let mut articles = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.pocket.list_articles(state, offset).await?;
            let page_len = page.len();
            articles.extend(page);
            if page_len < PAGE_SIZE {
                break;
            }
            offset += page_len;
        }

        Ok(articles)
    }

    /// Expands every candidate with a bounded concurrent pool.
    ///
    /// One failed expansion is logged and skipped; the rest still resolve.
    /// Completion order is irrelevant, results fold into a set.
    async fn expand_candidates(&self, candidates: HashSet<String>) -> HashSet<String> {
        if candidates.is_empty() {
            return HashSet::new();
        }

        info!(count = candidates.len(), "expanding shortened urls");
        let expander = self.expander;

        futures_util::stream::iter(candidates)
            .map(|url| async move {
                match expander.expand(&url).await {
                    Ok(expanded) => Some(expanded),
                    Err(error) => {
                        warn!(url = %url, error = %error, "failed to expand url, skipping");
                        None
                    }
                }
            })
            .buffer_unordered(EXPANSION_CONCURRENCY)
            .filter_map(|expanded| async move { expanded })
            .collect()
            .await
    }
}
