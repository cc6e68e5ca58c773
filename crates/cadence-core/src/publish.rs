//! Sheet-side publishing: writing a leadership summary back to a Track row.

use tracing::{debug, warn};

use crate::errors::SummaryError;
use crate::model::{WorkType, columns};
use crate::table::Table;

/// Write `summary` into the `Comments` column of the first Track row whose
/// description matches `track_name` case-insensitively, scanning top to
/// bottom.
///
/// A sheet without a `Comments` column fails with
/// [`SummaryError::NoSuchColumn`]. No matching Track row is a tolerated
/// miss: nothing is written and no error is raised.
pub async fn write_summary(
    table: &dyn Table,
    track_name: &str,
    summary: &str,
) -> Result<(), SummaryError> {
    let headers = table.headers().await?;
    let column = headers
        .iter()
        .position(|h| h == columns::COMMENTS)
        .map(|i| u32::try_from(i).unwrap_or(u32::MAX - 1) + 1)
        .ok_or_else(|| SummaryError::NoSuchColumn {
            column: columns::COMMENTS.to_string(),
        })?;

    let rows = table.rows_in_range(2, u32::MAX).await?;
    let matched = rows.iter().enumerate().find(|(_, row)| {
        WorkType::classify(row.get(columns::WORK_TYPE)) == WorkType::Track
            && row.get(columns::DESCRIPTION).eq_ignore_ascii_case(track_name)
    });

    match matched {
        Some((offset, _)) => {
            let index = 2 + u32::try_from(offset).unwrap_or(u32::MAX - 2);
            table.write_cell(index, column, summary).await?;
            debug!(track = track_name, row = index, "wrote leadership summary");
            Ok(())
        }
        None => {
            warn!(track = track_name, "no Track row matched; summary not written");
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
