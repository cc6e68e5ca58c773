//! Collaborator seam for the notes-document source.

use async_trait::async_trait;

use crate::errors::NotesError;

/// Plain-text document source, keyed by a reference string (a full document
/// URL or a bare document ID).
#[async_trait]
pub trait NotesSource: Send + Sync {
    /// Fetch the full plain-text content of the referenced document.
    async fn fetch(&self, reference: &str) -> Result<String, NotesError>;
}
