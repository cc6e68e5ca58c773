//! Atlassian Document Format construction.
//!
//! Jira Cloud's REST API v3 takes comment bodies as ADF documents rather
//! than plain strings. Comments here are plain text, so the mapping is
//! narrow: one paragraph node per non-blank line.

use serde_json::{Value, json};

/// Build an ADF document from plain text.
///
/// Each non-blank line becomes a paragraph. Blank input still produces a
/// single empty paragraph so the document stays structurally valid.
pub fn document(text: &str) -> Value {
    let mut paragraphs: Vec<Value> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            json!({
                "type": "paragraph",
                "content": [{"type": "text", "text": line}]
            })
        })
        .collect();
    if paragraphs.is_empty() {
        paragraphs.push(json!({"type": "paragraph", "content": []}));
    }

    json!({
        "type": "doc",
        "version": 1,
        "content": paragraphs
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_document() {
        let doc = document("All green this week.");
        assert_eq!(doc["type"], "doc");
        assert_eq!(doc["version"], 1);
        assert_eq!(doc["content"].as_array().unwrap().len(), 1);
        assert_eq!(
            doc["content"][0]["content"][0]["text"],
            "All green this week."
        );
    }

    #[test]
    fn lines_become_paragraphs() {
        let doc = document("Progress:\n- shipped login\n\nNext: load tests");
        let paragraphs = doc["content"].as_array().unwrap();
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[1]["content"][0]["text"], "- shipped login");
    }

    #[test]
    fn blank_text_keeps_one_empty_paragraph() {
        let doc = document("  \n ");
        let paragraphs = doc["content"].as_array().unwrap();
        assert_eq!(paragraphs.len(), 1);
        assert!(paragraphs[0]["content"].as_array().unwrap().is_empty());
    }
}
