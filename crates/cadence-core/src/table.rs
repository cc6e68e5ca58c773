//! Read/write abstraction over a 2-D tabular data source.
//!
//! Indices are 1-based to match the external sheet: row 1 is always the
//! header, data rows start at index 2. Rows are produced fresh on every read
//! and carry no identity beyond their position; implementations must not
//! cache across calls.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::errors::TableError;

/// One sheet row as an ordered mapping from column name to trimmed value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    /// Build a row by zipping header names with raw cell values.
    ///
    /// Values are trimmed; columns past the end of `values` (ragged rows)
    /// become empty strings.
    pub fn from_values(headers: &[String], values: &[String]) -> Self {
        let cells = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = values.get(i).map_or("", |v| v.trim());
                (header.clone(), value.to_string())
            })
            .collect();
        Self { cells }
    }

    /// Value of the named column, or the empty string if the column is
    /// absent. Absent and blank cells are indistinguishable by design.
    pub fn get(&self, column: &str) -> &str {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map_or("", |(_, value)| value.as_str())
    }
}

/// Read access plus single-cell write access to a tabular source.
///
/// The write half exists only for publishing; resolution never mutates.
#[async_trait]
pub trait Table: Send + Sync {
    /// The header row (row 1), in column order.
    async fn headers(&self) -> Result<Vec<String>, TableError>;

    /// The single row at a 1-based index.
    ///
    /// Fails with [`TableError::OutOfRange`] for the header index (1) or any
    /// index past the last populated row.
    async fn row(&self, index: u32) -> Result<Row, TableError>;

    /// Up to `count` rows starting at the 1-based index `start`.
    ///
    /// The range is clamped to the populated data rows; a start past the end
    /// yields an empty vector rather than an error.
    async fn rows_in_range(&self, start: u32, count: u32) -> Result<Vec<Row>, TableError>;

    /// Write a single cell value at a 1-based row and column index.
    async fn write_cell(&self, row: u32, column: u32, value: &str) -> Result<(), TableError>;
}

/// In-memory [`Table`] used by tests and offline runs.
pub struct MemoryTable {
    headers: Vec<String>,
    rows: RwLock<Vec<Vec<String>>>,
}

impl MemoryTable {
    /// Create a table from a header row and data rows (data row 0 is sheet
    /// row 2).
    pub fn new(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> Self {
        Self {
            headers: headers.into_iter().map(String::from).collect(),
            rows: RwLock::new(
                rows.into_iter()
                    .map(|r| r.into_iter().map(String::from).collect())
                    .collect(),
            ),
        }
    }

    /// Last populated 1-based row index (1 when there are no data rows).
    fn last(&self) -> u32 {
        1 + u32::try_from(self.rows.read().len()).unwrap_or(u32::MAX - 1)
    }

    /// Raw cell value at a 1-based row and column index, for assertions.
    pub fn cell(&self, row: u32, column: u32) -> Option<String> {
        let rows = self.rows.read();
        let r = rows.get(row.checked_sub(2)? as usize)?;
        r.get(column.checked_sub(1)? as usize).cloned()
    }
}

#[async_trait]
impl Table for MemoryTable {
    async fn headers(&self) -> Result<Vec<String>, TableError> {
        Ok(self.headers.clone())
    }

    async fn row(&self, index: u32) -> Result<Row, TableError> {
        let last = self.last();
        if index < 2 || index > last {
            return Err(TableError::OutOfRange { index, last });
        }
        let rows = self.rows.read();
        Ok(Row::from_values(&self.headers, &rows[(index - 2) as usize]))
    }

    async fn rows_in_range(&self, start: u32, count: u32) -> Result<Vec<Row>, TableError> {
        let rows = self.rows.read();
        let first = start.max(2);
        let end = u64::from(first) + u64::from(count);
        Ok(rows
            .iter()
            .enumerate()
            .map(|(i, values)| (2 + i as u64, values))
            .filter(|(index, _)| *index >= u64::from(first) && *index < end)
            .map(|(_, values)| Row::from_values(&self.headers, values))
            .collect())
    }

    async fn write_cell(&self, row: u32, column: u32, value: &str) -> Result<(), TableError> {
        let last = self.last();
        if row < 2 || row > last {
            return Err(TableError::OutOfRange { index: row, last });
        }
        let mut rows = self.rows.write();
        let target = &mut rows[(row - 2) as usize];
        let col = (column - 1) as usize;
        if target.len() <= col {
            target.resize(col + 1, String::new());
        }
        target[col] = value.to_string();
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MemoryTable {
        MemoryTable::new(
            vec!["WorkType", "Description", "Status"],
            vec![
                vec!["Track", "Auth", "Green"],
                vec!["Milestone", "  Login API  ", "In Progress"],
                vec!["Milestone", "Logout API"],
            ],
        )
    }

    // ── Row ─────────────────────────────────────────────────────────────

    #[test]
    fn row_trims_values() {
        let headers = vec!["A".to_string(), "B".to_string()];
        let row = Row::from_values(&headers, &["  x  ".to_string(), "y".to_string()]);
        assert_eq!(row.get("A"), "x");
        assert_eq!(row.get("B"), "y");
    }

    #[test]
    fn row_missing_column_is_empty() {
        let headers = vec!["A".to_string()];
        let row = Row::from_values(&headers, &["x".to_string()]);
        assert_eq!(row.get("Nope"), "");
    }

    #[test]
    fn row_pads_ragged_values() {
        let headers = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let row = Row::from_values(&headers, &["x".to_string()]);
        assert_eq!(row.get("B"), "");
        assert_eq!(row.get("C"), "");
    }

    // ── MemoryTable reads ───────────────────────────────────────────────

    #[tokio::test]
    async fn headers_in_order() {
        let t = table();
        assert_eq!(
            t.headers().await.unwrap(),
            vec!["WorkType", "Description", "Status"]
        );
    }

    #[tokio::test]
    async fn row_by_index() {
        let t = table();
        let row = t.row(3).await.unwrap();
        assert_eq!(row.get("Description"), "Login API");
        assert_eq!(row.get("Status"), "In Progress");
    }

    #[tokio::test]
    async fn ragged_row_reads_empty() {
        let t = table();
        let row = t.row(4).await.unwrap();
        assert_eq!(row.get("Status"), "");
    }

    #[tokio::test]
    async fn header_index_is_out_of_range() {
        let t = table();
        let err = t.row(1).await.unwrap_err();
        assert!(matches!(err, TableError::OutOfRange { index: 1, last: 4 }));
    }

    #[tokio::test]
    async fn past_end_is_out_of_range() {
        let t = table();
        assert!(matches!(
            t.row(5).await.unwrap_err(),
            TableError::OutOfRange { index: 5, .. }
        ));
    }

    #[tokio::test]
    async fn range_clamps_to_populated_rows() {
        let t = table();
        let rows = t.rows_in_range(2, u32::MAX).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("Description"), "Auth");
    }

    #[tokio::test]
    async fn range_subset() {
        let t = table();
        let rows = t.rows_in_range(3, 1).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Description"), "Login API");
    }

    #[tokio::test]
    async fn range_past_end_is_empty() {
        let t = table();
        assert!(t.rows_in_range(10, 5).await.unwrap().is_empty());
    }

    // ── MemoryTable writes ──────────────────────────────────────────────

    #[tokio::test]
    async fn write_cell_replaces_value() {
        let t = table();
        t.write_cell(2, 3, "Yellow").await.unwrap();
        assert_eq!(t.cell(2, 3).as_deref(), Some("Yellow"));
    }

    #[tokio::test]
    async fn write_cell_extends_short_row() {
        let t = table();
        t.write_cell(4, 3, "Done").await.unwrap();
        assert_eq!(t.cell(4, 3).as_deref(), Some("Done"));
    }

    #[tokio::test]
    async fn write_cell_out_of_range() {
        let t = table();
        assert!(matches!(
            t.write_cell(9, 1, "x").await.unwrap_err(),
            TableError::OutOfRange { index: 9, .. }
        ));
    }
}
