//! Error types for table access, context resolution, and sheet publishing.

use thiserror::Error;

/// Errors produced by [`crate::table::Table`] implementations.
#[derive(Debug, Error)]
pub enum TableError {
    /// Requested row index is the header row or past the last populated row.
    #[error("Row {index} is out of range (data rows are 2..={last})")]
    OutOfRange {
        /// The requested 1-based row index.
        index: u32,
        /// The last populated row index.
        last: u32,
    },

    /// The backing store failed to serve the request.
    #[error("Table backend error: {message}")]
    Backend {
        /// Description of the backend failure.
        message: String,
    },
}

/// Errors produced by [`crate::resolver::resolve`].
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Underlying table access failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// The target row is not a Milestone row.
    #[error("Row {index} is not a Milestone (WorkType is '{work_type}')")]
    NotAMilestone {
        /// The target row index.
        index: u32,
        /// The WorkType value actually found.
        work_type: String,
    },

    /// The target Milestone row has an empty Jira ID cell.
    #[error("Milestone at row {index} has no Jira ID")]
    MissingTrackerId {
        /// The target row index.
        index: u32,
    },
}

/// Errors produced by [`crate::publish::write_summary`].
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Underlying table access failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// The sheet has no summary column in its header row.
    #[error("Sheet has no '{column}' column")]
    NoSuchColumn {
        /// The expected column name.
        column: String,
    },
}

/// Failure fetching a notes document. Callers that compose prompts recover
/// from this by substituting a sentinel string.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct NotesError {
    /// Description of the fetch failure.
    pub message: String,
}

impl NotesError {
    /// Create a notes fetch error from any displayable reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
