//! Persisted URL sets with an atomic-overwrite contract.
//!
//! Each set is one newline-delimited plain-text file, one URL per line, no
//! header and no ordering guarantee. The lifecycle is explicit: load the
//! whole set into memory, mutate it there, then overwrite the file in one
//! step. The overwrite goes through a sibling temporary file followed by a
//! rename, so a crash mid-save leaves the previous file version intact.
//!
//! A URL containing a newline is unsupported by the format.

mod error;

pub use error::StoreError;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// One persisted URL set backed by a plain-text file.
#[derive(Debug, Clone)]
pub struct UrlSetFile {
    path: PathBuf,
}

impl UrlSetFile {
    /// Creates a handle for the set stored at `path`.
    ///
    /// The file is not touched until [`load`](Self::load) or
    /// [`save`](Self::save) is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full set into memory.
    ///
    /// A missing file is the empty set, not an error. Lines are trimmed and
    /// blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] for any IO failure other than the file
    /// not existing.
    pub fn load(&self) -> Result<HashSet<String>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "url set file absent, starting empty");
                return Ok(HashSet::new());
            }
            Err(error) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: error,
                });
            }
        };

        let urls: HashSet<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect();

        debug!(path = %self.path.display(), count = urls.len(), "loaded url set");
        Ok(urls)
    }

    /// Overwrites the backing file with `urls`, atomically.
    ///
    /// The set is written to `<path>.tmp` in the same directory and renamed
    /// over the target, so readers never observe a partially written file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Write`] if the temporary file cannot be
    /// written, or [`StoreError::Replace`] if the rename fails.
    pub fn save(&self, urls: &HashSet<String>) -> Result<(), StoreError> {
        let tmp_path = self.tmp_path();

        let mut contents = String::new();
        for url in urls {
            contents.push_str(url);
            contents.push('\n');
        }

        fs::write(&tmp_path, contents).map_err(|error| StoreError::Write {
            path: tmp_path.clone(),
            source: error,
        })?;

        fs::rename(&tmp_path, &self.path).map_err(|error| StoreError::Replace {
            path: self.path.clone(),
            source: error,
        })?;

        debug!(path = %self.path.display(), count = urls.len(), "persisted url set");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
