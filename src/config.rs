//! Typed configuration for external service credentials.
//!
//! Credentials are loaded once, explicitly, at command startup and passed
//! into the clients that need them. A missing variable is a fatal startup
//! error; no remote call is attempted with partial configuration.

use std::env;

use thiserror::Error;

/// Environment variable holding the Pocket consumer key.
pub const POCKET_CONSUMER_KEY_VAR: &str = "POCKET_CONSUMER_KEY";

/// Environment variable holding the Pocket access token.
pub const POCKET_ACCESS_TOKEN_VAR: &str = "POCKET_ACCESS_TOKEN";

/// Errors raised while assembling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent or empty.
    #[error("missing required environment variable {name}")]
    MissingEnv {
        /// Name of the missing variable.
        name: &'static str,
    },
}

/// Pocket API credentials.
///
/// Obtaining these (the OAuth dance) is out of scope; they are expected in
/// the environment. See <https://getpocket.com/developer/docs/authentication>.
#[derive(Debug, Clone)]
pub struct PocketCredentials {
    /// Application consumer key.
    pub consumer_key: String,
    /// User access token.
    pub access_token: String,
}

impl PocketCredentials {
    /// Loads credentials from `POCKET_CONSUMER_KEY` / `POCKET_ACCESS_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when either variable is absent
    /// or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            consumer_key: require_env(POCKET_CONSUMER_KEY_VAR)?,
            access_token: require_env(POCKET_ACCESS_TOKEN_VAR)?,
        })
    }

    /// Builds credentials from explicit values (used by tests and callers
    /// that manage their own secret storage).
    #[must_use]
    pub fn new(consumer_key: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            access_token: access_token.into(),
        }
    }
}

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnv { name }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new_stores_values() {
        let credentials = PocketCredentials::new("ck", "at");
        assert_eq!(credentials.consumer_key, "ck");
        assert_eq!(credentials.access_token, "at");
    }

    #[test]
    fn test_missing_env_error_names_variable() {
        let error = ConfigError::MissingEnv {
            name: POCKET_ACCESS_TOKEN_VAR,
        };
        assert!(error.to_string().contains("POCKET_ACCESS_TOKEN"));
    }
}
