//! Configuration error types.

use thiserror::Error;

/// Errors raised while building [`crate::Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A required configuration key is absent or empty.
    #[error("Missing required configuration key: {key}")]
    Missing {
        /// The environment variable name.
        key: String,
    },
}
