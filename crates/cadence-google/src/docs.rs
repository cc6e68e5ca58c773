//! Google Docs implementation of the [`NotesSource`] trait.
//!
//! Notes links in the tracker point at Google Docs. The document body is a
//! tree of structural elements; text lives in paragraph text runs, which may
//! also sit inside table cells. Everything else (images, breaks, drawings)
//! is ignored.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use cadence_core::errors::NotesError;
use cadence_core::notes::NotesSource;

static DOC_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/document/d/([a-zA-Z0-9_-]+)").unwrap_or_else(|e| panic!("doc id pattern: {e}"))
});

/// Configuration for [`GoogleDocs`].
#[derive(Clone, Debug)]
pub struct DocsConfig {
    /// Docs API base URL.
    pub base_url: String,
    /// OAuth bearer token.
    pub access_token: String,
}

/// Notes source backed by the Google Docs REST API.
pub struct GoogleDocs {
    config: DocsConfig,
    client: reqwest::Client,
}

impl GoogleDocs {
    /// Create a docs client with its own HTTP connection pool.
    #[must_use]
    pub fn new(config: DocsConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create a docs client with a shared HTTP connection pool.
    #[must_use]
    pub fn with_client(config: DocsConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

/// Extract a document id from a notes reference.
///
/// Accepts a full share URL (`https://docs.google.com/document/d/<id>/edit`)
/// or a bare document id, which passes through trimmed.
#[must_use]
pub fn extract_doc_id(reference: &str) -> String {
    DOC_ID
        .captures(reference)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| reference.trim().to_string(), |m| m.as_str().to_string())
}

#[async_trait]
impl NotesSource for GoogleDocs {
    async fn fetch(&self, reference: &str) -> Result<String, NotesError> {
        let doc_id = extract_doc_id(reference);
        let url = format!("{}/v1/documents/{doc_id}", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| NotesError::new(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotesError::new(format!(
                "Docs API {} for document {doc_id}: {body}",
                status.as_u16()
            )));
        }

        let document: Value = response
            .json()
            .await
            .map_err(|e| NotesError::new(e.to_string()))?;
        let text = extract_text(&document);
        debug!(doc_id = %doc_id, chars = text.len(), "fetched notes document");
        Ok(text)
    }
}

/// Concatenate all text runs in a document body, in document order.
fn extract_text(document: &Value) -> String {
    let mut out = String::new();
    if let Some(content) = document["body"]["content"].as_array() {
        collect_elements(content, &mut out);
    }
    out
}

fn collect_elements(elements: &[Value], out: &mut String) {
    for element in elements {
        if let Some(runs) = element["paragraph"]["elements"].as_array() {
            for run in runs {
                if let Some(text) = run["textRun"]["content"].as_str() {
                    out.push_str(text);
                }
            }
        }
        if let Some(rows) = element["table"]["tableRows"].as_array() {
            for row in rows {
                if let Some(cells) = row["tableCells"].as_array() {
                    for cell in cells {
                        if let Some(content) = cell["content"].as_array() {
                            collect_elements(content, out);
                        }
                    }
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
