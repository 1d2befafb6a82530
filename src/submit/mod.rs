//! Rate-limited submission pass over the pending URL queue.
//!
//! A pass loads the *to-submit* and *submitted* sets, drops URLs already
//! known-submitted, and walks the remainder strictly sequentially: check
//! for an existing snapshot, submit if there is none, then sleep a fixed
//! interval. The Wayback Machine caps clients at roughly 15 requests per
//! minute; the default 6 second delay keeps a check+save pair per URL at
//! 10 cycles per minute, safely under it. Concurrency here would invite
//! throttling, so none is used.
//!
//! Failed URLs stay in the pending queue for the next pass; successes
//! (fresh submissions and already-archived skips alike) move into the
//! submitted set.

use std::collections::HashSet;
use std::time::Duration;

use indicatif::ProgressBar;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::archive::{ArchiveError, ArchiveService};
use crate::store::{StoreError, UrlSetFile};

/// Default pause after each processed URL.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_secs(6);

/// Errors that abort a submission pass.
///
/// Only persistence failures qualify; anything going wrong with a single
/// URL is contained, logged, and counted instead.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// A queue file could not be read or persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Counts reported by one submission pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitOutcome {
    /// URLs newly recorded as submitted (fresh saves plus already-archived).
    pub submitted: usize,
    /// URLs skipped because the submitted set already contained them.
    pub skipped: usize,
    /// URLs that failed and stay queued for the next pass.
    pub failed: usize,
}

/// Terminal state of one URL within a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UrlOutcome {
    /// A snapshot already exists; nothing to do.
    AlreadyArchived,
    /// The save request was accepted.
    Submitted,
    /// The save request was rejected; retry on a later pass.
    Failed,
}

/// Drains the pending queue into the archiving service.
pub struct SubmitEngine<'a> {
    archive: &'a dyn ArchiveService,
    to_submit: &'a UrlSetFile,
    submitted: &'a UrlSetFile,
    delay: Duration,
}

impl<'a> SubmitEngine<'a> {
    /// Creates an engine with the default inter-request delay.
    pub fn new(
        archive: &'a dyn ArchiveService,
        to_submit: &'a UrlSetFile,
        submitted: &'a UrlSetFile,
    ) -> Self {
        Self {
            archive,
            to_submit,
            submitted,
            delay: DEFAULT_SUBMIT_DELAY,
        }
    }

    /// Overrides the pause applied after every processed URL.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Runs one submission pass.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] only for queue persistence failures. A
    /// failing URL never aborts the pass.
    pub async fn submit_pending(&self) -> Result<SubmitOutcome, SubmitError> {
        let mut submitted_set = self.submitted.load()?;
        let queued = self.to_submit.load()?;

        // Known-submitted URLs are silent no-op skips, not errors.
        let mut pending: Vec<String> = queued
            .iter()
            .filter(|url| !submitted_set.contains(*url))
            .cloned()
            .collect();
        pending.sort_unstable();
        let skipped = queued.len() - pending.len();

        info!(
            pending = pending.len(),
            skipped,
            "starting submission pass"
        );

        let mut failed: HashSet<String> = HashSet::new();
        let progress = ProgressBar::new(pending.len() as u64);

        for url in &pending {
            match self.process_url(url).await {
                Ok(UrlOutcome::AlreadyArchived) => {
                    debug!(url = %url, "already archived");
                    submitted_set.insert(url.clone());
                }
                Ok(UrlOutcome::Submitted) => {
                    debug!(url = %url, "submitted for archiving");
                    submitted_set.insert(url.clone());
                }
                Ok(UrlOutcome::Failed) => {
                    warn!(url = %url, "save request rejected, will retry next pass");
                    failed.insert(url.clone());
                }
                Err(err) => {
                    error!(url = %url, error = %err, "error processing url, continuing");
                    failed.insert(url.clone());
                }
            }

            progress.inc(1);
            // Applied after every URL, success or failure, to stay under
            // the service rate ceiling.
            tokio::time::sleep(self.delay).await;
        }

        progress.finish_and_clear();

        // Submitted history first: a crash between the two writes can then
        // only leave a URL in both files, which the next pass skips.
        self.submitted.save(&submitted_set)?;
        self.to_submit.save(&failed)?;

        let outcome = SubmitOutcome {
            submitted: pending.len() - failed.len(),
            skipped,
            failed: failed.len(),
        };
        info!(
            submitted = outcome.submitted,
            skipped = outcome.skipped,
            failed = outcome.failed,
            "submission pass complete"
        );
        Ok(outcome)
    }

    async fn process_url(&self, url: &str) -> Result<UrlOutcome, ArchiveError> {
        if self.archive.check_archived(url).await? {
            return Ok(UrlOutcome::AlreadyArchived);
        }
        if self.archive.submit(url).await? {
            Ok(UrlOutcome::Submitted)
        } else {
            Ok(UrlOutcome::Failed)
        }
    }
}
