//! Update composition: deterministic prompt building and reply parsing.
//!
//! The prompt serializes the resolved sibling milestones plus the raw notes
//! text into one instruction-following request that names the exact target
//! Jira ID and pins the reply shape. The reply parser accepts the JSON
//! payload with at most one fenced-block wrapper around it: optional
//! leading fence line, opaque payload, optional trailing fence.

use tracing::warn;

use cadence_core::model::{Context, Update};
use cadence_core::notes::NotesSource;

use crate::errors::ComposeError;

/// Placeholder used when a track has no readable notes document.
const NO_NOTES: &str = "No notes available.";

/// Build the completion prompt for one target milestone.
///
/// Deterministic: the same context and notes text always produce the same
/// string.
pub fn build_prompt(context: &Context, notes_text: &str) -> String {
    let milestones_json =
        serde_json::to_string_pretty(&context.sibling_milestones).unwrap_or_default();
    let notes = if notes_text.trim().is_empty() {
        NO_NOTES
    } else {
        notes_text
    };

    format!(
        "You have been given:\n\
         1. The list of milestones for the \"{track}\" track (workstream \"{workstream}\")\n\
         2. The full text of the track's notes document\n\n\
         Your job: generate a structured status update for milestone {jira_id} (\"{name}\").\n\n\
         MILESTONES:\n{milestones_json}\n\n\
         NOTES DOCUMENT:\n{notes}\n\n\
         RULES:\n\
         - Map information from the notes document to the correct milestone.\n\
         - If the notes document does not mention milestone {jira_id}, use its existing\n\
         \x20 status and any previous status update to generate a reasonable update.\n\
         - Be factual. Do not invent progress that is not supported by the notes.\n\
         - progress_summary, recent_changes, next_steps: 2-4 bullet points each.\n\
         - leadership_summary: a single executive-level sentence, no task-level detail.\n\n\
         Return ONLY valid JSON in this exact format (no markdown, no explanation):\n\n\
         {{\n\
         \x20 \"progress_summary\": [\"...\"],\n\
         \x20 \"recent_changes\": [\"...\"],\n\
         \x20 \"next_steps\": [\"...\"],\n\
         \x20 \"leadership_summary\": \"...\"\n\
         }}\n",
        track = context.track_name,
        workstream = context.workstream_name,
        jira_id = context.milestone.jira_id,
        name = context.milestone.name,
    )
}

/// Parse a completion reply into an [`Update`].
///
/// Strips at most one fenced-block wrapper, then requires the remaining
/// payload to be valid JSON in the `Update` shape.
pub fn parse_reply(raw: &str) -> Result<Update, ComposeError> {
    let payload = strip_fence(raw);
    serde_json::from_str(payload).map_err(|e| ComposeError::MalformedReply {
        message: e.to_string(),
    })
}

/// Remove one optional fenced-block wrapper.
///
/// Grammar: optional leading fence line (the fence may carry a language
/// tag), opaque payload, optional trailing fence. Anything that is not a
/// wrapper is returned trimmed and untouched.
fn strip_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Fetch the notes text behind a track's notes link.
///
/// Notes unavailability must never block composition: an empty link yields
/// the placeholder, and a fetch failure yields a sentinel string embedding
/// the reason instead of propagating the error.
pub async fn fetch_notes(source: &dyn NotesSource, link: &str) -> String {
    if link.is_empty() {
        return NO_NOTES.to_string();
    }
    match source.fetch(link).await {
        Ok(text) if text.trim().is_empty() => NO_NOTES.to_string(),
        Ok(text) => text,
        Err(e) => {
            warn!(link, error = %e, "notes fetch failed, composing without notes");
            format!("[Error fetching notes: {e}]")
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
