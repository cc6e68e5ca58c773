//! Tracker Schema v1 data model.
//!
//! A tracker sheet is a flat grid where the `WorkType` column encodes the
//! hierarchy: `Track` rows group large initiatives, `Workstream` rows group
//! work under a Track, and `Milestone` rows are the trackable deliverables
//! carrying Jira IDs.

use serde::{Deserialize, Serialize};

/// Column names required by Tracker Schema v1.
pub mod columns {
    /// Row classification column.
    pub const WORK_TYPE: &str = "WorkType";
    /// Human-readable name of the track, workstream, or milestone.
    pub const DESCRIPTION: &str = "Description";
    /// Current status value.
    pub const STATUS: &str = "Status";
    /// Milestone target completion date.
    pub const TARGET_DATE: &str = "Target Date";
    /// Milestone owner.
    pub const OWNER: &str = "Milestone Owner";
    /// External tracker issue key.
    pub const JIRA_ID: &str = "Jira ID";
    /// Link to the track's notes document.
    pub const NOTES: &str = "Notes";
    /// Previous status-update text.
    pub const STATUS_UPDATE: &str = "Status Update";
    /// Leadership summary column written back by publishing.
    pub const COMMENTS: &str = "Comments";
}

/// All columns a Tracker Schema v1 sheet must carry.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    columns::WORK_TYPE,
    columns::DESCRIPTION,
    columns::STATUS,
    columns::TARGET_DATE,
    columns::OWNER,
    columns::JIRA_ID,
    columns::NOTES,
    columns::STATUS_UPDATE,
    columns::COMMENTS,
];

/// Return the required columns missing from a header row, in schema order.
pub fn validate_schema(headers: &[String]) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(|col| (*col).to_string())
        .collect()
}

/// Classification of a tracker row by its `WorkType` cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkType {
    /// Top-level grouping row for a large initiative.
    Track,
    /// Grouping row nested under a Track.
    Workstream,
    /// Leaf row for a trackable deliverable.
    Milestone,
    /// Anything else, including blank rows.
    Other,
}

impl WorkType {
    /// Classify a raw `WorkType` cell value. Matching is exact; unknown
    /// values fall through to [`WorkType::Other`].
    pub fn classify(value: &str) -> Self {
        match value {
            "Track" => Self::Track,
            "Workstream" => Self::Workstream,
            "Milestone" => Self::Milestone,
            _ => Self::Other,
        }
    }
}

/// A Milestone row lifted out of the sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone name (the `Description` cell).
    pub name: String,
    /// Current status.
    pub status: String,
    /// Target completion date, as written in the sheet.
    pub target_date: String,
    /// Milestone owner.
    pub owner: String,
    /// External tracker issue key.
    pub jira_id: String,
    /// Previous status-update text.
    pub previous_status_update: String,
}

/// The resolved bundle for one selected Milestone row: its ancestry plus the
/// sibling Milestones of the enclosing Track's block.
///
/// Built on demand by [`crate::resolver::resolve`] and consumed once by the
/// update composer. Empty ancestry fields mean no ancestor row was found
/// above the target, which is valid output, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context {
    /// The target Milestone itself.
    pub milestone: Milestone,
    /// Name of the nearest Workstream row above the target, or empty.
    pub workstream_name: String,
    /// Name of the nearest Track row above the target, or empty.
    pub track_name: String,
    /// Status of that Track row, or empty.
    pub track_status: String,
    /// Notes-document link of that Track row, or empty.
    pub notes_link: String,
    /// Milestone rows of the Track's block carrying a non-empty Jira ID,
    /// in document order. Includes the target itself.
    pub sibling_milestones: Vec<Milestone>,
}

/// The structured status report produced by the completion endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// Bullet points describing progress to date.
    pub progress_summary: Vec<String>,
    /// Bullet points describing what changed recently.
    pub recent_changes: Vec<String>,
    /// Bullet points describing upcoming work.
    pub next_steps: Vec<String>,
    /// Single executive-level sentence.
    pub leadership_summary: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
