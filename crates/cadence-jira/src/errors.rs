//! Error types for tracker publishing.

use thiserror::Error;

/// Errors from posting to the issue tracker.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Transport-level failure.
    #[error("Tracker request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The tracker reported a status outside the success set {200, 201}.
    #[error("Tracker rejected the comment ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
}
