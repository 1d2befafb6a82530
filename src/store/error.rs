//! Error types for URL set persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving a persisted URL set.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read the set file.
    #[error("failed to read url set {path}: {source}")]
    Read {
        /// Path of the set file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the temporary replacement file.
    #[error("failed to write url set {path}: {source}")]
    Write {
        /// Path of the temporary file being written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to rename the temporary file over the target.
    #[error("failed to replace url set {path}: {source}")]
    Replace {
        /// Path of the target set file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
