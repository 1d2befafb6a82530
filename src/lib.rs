//! Wayback Utils Core Library
//!
//! This library maintains a durable queue of URLs destined for the Internet
//! Archive's Wayback Machine and deduplicates Pocket bookmarks before they
//! enter that queue.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`store`] - Persisted URL sets with an atomic-overwrite contract
//! - [`urls`] - URL normalization for duplicate detection
//! - [`pocket`] - Pocket API client (listing, batch delete/add)
//! - [`expand`] - Shortened-URL expansion via redirect following
//! - [`archive`] - Wayback Machine client (availability check, save)
//! - [`dedup`] - Dedup reconciler feeding the submission queue
//! - [`submit`] - Rate-limited submission pass over the pending queue
//! - [`config`] - Typed credential configuration

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod config;
pub mod dedup;
pub mod expand;
mod http;
pub mod pocket;
pub mod store;
pub mod submit;
pub mod urls;

// Re-export commonly used types
pub use archive::{ArchiveError, ArchiveService, WaybackClient};
pub use config::{ConfigError, PocketCredentials};
pub use dedup::{DedupError, DedupOutcome, Reconciler};
pub use expand::{ExpandError, MEDIUM_SHORT_PREFIX, RedirectExpander, UrlExpander};
pub use pocket::{
    Article, ArticleState, BatchDeleteOutcome, BookmarkService, PAGE_SIZE, PocketClient,
    PocketError,
};
pub use store::{StoreError, UrlSetFile};
pub use submit::{DEFAULT_SUBMIT_DELAY, SubmitEngine, SubmitError, SubmitOutcome};
pub use urls::normalize_url;
