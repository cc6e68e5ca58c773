//! Error types for completion calls and reply parsing.

use thiserror::Error;

/// Errors from the completion endpoint client.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Transport-level failure.
    #[error("Completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Completion API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The API answered successfully but without any text content.
    #[error("Completion reply contained no text")]
    NoText,
}

/// Errors from composing prompts and parsing replies.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The reply was not valid structured data in the expected shape.
    #[error("Malformed completion reply: {message}")]
    MalformedReply {
        /// Description of what failed to parse.
        message: String,
    },
}
