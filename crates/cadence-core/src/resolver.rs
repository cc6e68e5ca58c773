//! Hierarchical row-context resolution.
//!
//! Given the index of a Milestone row, reconstructs the enclosing Track and
//! Workstream plus the sibling Milestone list of the Track's block, without
//! the sheet ever storing an explicit tree:
//!
//! 1. a single backward pass above the target finds the nearest Track and
//!    Workstream rows independently (nearest-ancestor semantics);
//! 2. a single forward pass from the Track's heading row collects the
//!    Milestone rows of its block.
//!
//! The sibling scan binds to the Track by row index, not by description
//! text, so two Tracks sharing a description cannot cross-contaminate.

use tracing::debug;

use crate::errors::ResolveError;
use crate::model::{Context, Milestone, WorkType, columns};
use crate::table::{Row, Table};

/// Nearest Track row found by the upward scan.
struct TrackSlot {
    index: u32,
    name: String,
    status: String,
    notes_link: String,
}

/// Resolve the context for the Milestone row at `target_index`.
///
/// Missing ancestors are not an error: the corresponding fields come back
/// empty, signaling a malformed or top-level sheet structure to the caller.
pub async fn resolve(table: &dyn Table, target_index: u32) -> Result<Context, ResolveError> {
    let target = table.row(target_index).await?;

    let work_type = target.get(columns::WORK_TYPE);
    if WorkType::classify(work_type) != WorkType::Milestone {
        return Err(ResolveError::NotAMilestone {
            index: target_index,
            work_type: work_type.to_string(),
        });
    }
    if target.get(columns::JIRA_ID).is_empty() {
        return Err(ResolveError::MissingTrackerId {
            index: target_index,
        });
    }
    let milestone = milestone_from_row(&target);

    let (track, workstream_name) = scan_ancestry(table, target_index).await?;

    let sibling_milestones = match &track {
        Some(slot) => scan_siblings(table, slot.index).await?,
        None => Vec::new(),
    };

    debug!(
        target_index,
        track = track.as_ref().map_or("", |t| t.name.as_str()),
        workstream = %workstream_name,
        siblings = sibling_milestones.len(),
        "resolved milestone context"
    );

    let (track_name, track_status, notes_link) = match track {
        Some(slot) => (slot.name, slot.status, slot.notes_link),
        None => (String::new(), String::new(), String::new()),
    };

    Ok(Context {
        milestone,
        workstream_name,
        track_name,
        track_status,
        notes_link,
        sibling_milestones,
    })
}

/// Backward pass from the row above the target to row 2.
///
/// Fills the Track slot and the Workstream slot independently; each takes
/// the nearest matching row. Stops early once both are filled.
async fn scan_ancestry(
    table: &dyn Table,
    target_index: u32,
) -> Result<(Option<TrackSlot>, String), ResolveError> {
    let above = if target_index > 2 {
        table.rows_in_range(2, target_index - 2).await?
    } else {
        Vec::new()
    };

    let mut track: Option<TrackSlot> = None;
    let mut workstream: Option<String> = None;

    for (offset, row) in above.iter().enumerate().rev() {
        let index = 2 + u32::try_from(offset).unwrap_or(u32::MAX - 2);
        match WorkType::classify(row.get(columns::WORK_TYPE)) {
            WorkType::Track if track.is_none() => {
                track = Some(TrackSlot {
                    index,
                    name: row.get(columns::DESCRIPTION).to_string(),
                    status: row.get(columns::STATUS).to_string(),
                    notes_link: row.get(columns::NOTES).to_string(),
                });
            }
            WorkType::Workstream if workstream.is_none() => {
                workstream = Some(row.get(columns::DESCRIPTION).to_string());
            }
            _ => {}
        }
        if track.is_some() && workstream.is_some() {
            break;
        }
    }

    Ok((track, workstream.unwrap_or_default()))
}

/// Forward pass over the Track block starting just below its heading row.
///
/// A Track row always ends the block. A Workstream row ends it only once a
/// Milestone row has been seen; a Workstream header sitting between the
/// heading and the first Milestone belongs to the block's preamble.
/// Milestones without a Jira ID are passed over but still count as seen.
async fn scan_siblings(table: &dyn Table, track_index: u32) -> Result<Vec<Milestone>, ResolveError> {
    let rows = table.rows_in_range(track_index + 1, u32::MAX).await?;

    let mut siblings = Vec::new();
    let mut seen_milestone = false;
    for row in &rows {
        match WorkType::classify(row.get(columns::WORK_TYPE)) {
            WorkType::Track => break,
            WorkType::Workstream => {
                if seen_milestone {
                    break;
                }
            }
            WorkType::Milestone => {
                seen_milestone = true;
                if !row.get(columns::JIRA_ID).is_empty() {
                    siblings.push(milestone_from_row(row));
                }
            }
            WorkType::Other => {}
        }
    }
    Ok(siblings)
}

fn milestone_from_row(row: &Row) -> Milestone {
    Milestone {
        name: row.get(columns::DESCRIPTION).to_string(),
        status: row.get(columns::STATUS).to_string(),
        target_date: row.get(columns::TARGET_DATE).to_string(),
        owner: row.get(columns::OWNER).to_string(),
        jira_id: row.get(columns::JIRA_ID).to_string(),
        previous_status_update: row.get(columns::STATUS_UPDATE).to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
