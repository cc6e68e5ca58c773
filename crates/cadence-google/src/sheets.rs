//! Google Sheets implementation of the [`Table`] trait.
//!
//! Every trait call fetches the value grid anew; rows are never cached
//! across calls, so a resolve sees the sheet as it is at that moment.
//! Reads use `values.get`, the single-cell write uses `values.update` with
//! raw input.

use async_trait::async_trait;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::debug;

use cadence_core::errors::TableError;
use cadence_core::table::{Row, Table};

/// Configuration for [`SheetsTable`].
#[derive(Clone, Debug)]
pub struct SheetsConfig {
    /// Sheets API base URL.
    pub base_url: String,
    /// OAuth bearer token.
    pub access_token: String,
    /// Spreadsheet identifier.
    pub spreadsheet_id: String,
    /// Range (tab) name, e.g. `Sheet1`.
    pub range: String,
}

/// Response shape of `values.get`.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// A tracker sheet backed by the Google Sheets REST API.
pub struct SheetsTable {
    config: SheetsConfig,
    client: reqwest::Client,
}

impl SheetsTable {
    /// Create a table client with its own HTTP connection pool.
    #[must_use]
    pub fn new(config: SheetsConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create a table client with a shared HTTP connection pool.
    #[must_use]
    pub fn with_client(config: SheetsConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.config.base_url,
            self.config.spreadsheet_id,
            utf8_percent_encode(range, NON_ALPHANUMERIC)
        )
    }

    /// Fetch the full value grid (header row included).
    async fn fetch_values(&self) -> Result<Vec<Vec<String>>, TableError> {
        let url = self.values_url(&self.config.range);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(backend)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TableError::Backend {
                message: format!("Sheets API {}: {body}", status.as_u16()),
            });
        }

        let range: ValueRange = response.json().await.map_err(backend)?;
        debug!(rows = range.values.len(), "fetched sheet values");
        Ok(range.values)
    }

    fn header_row(values: &[Vec<String>]) -> Vec<String> {
        values
            .first()
            .map(|row| row.iter().map(|h| h.trim().to_string()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Table for SheetsTable {
    async fn headers(&self) -> Result<Vec<String>, TableError> {
        let values = self.fetch_values().await?;
        Ok(Self::header_row(&values))
    }

    async fn row(&self, index: u32) -> Result<Row, TableError> {
        let values = self.fetch_values().await?;
        let last = u32::try_from(values.len()).unwrap_or(u32::MAX - 1);
        if index < 2 || index > last {
            return Err(TableError::OutOfRange { index, last });
        }
        let headers = Self::header_row(&values);
        Ok(Row::from_values(&headers, &values[(index - 1) as usize]))
    }

    async fn rows_in_range(&self, start: u32, count: u32) -> Result<Vec<Row>, TableError> {
        let values = self.fetch_values().await?;
        let headers = Self::header_row(&values);
        let first = start.max(2);
        let end = u64::from(first) + u64::from(count);
        Ok(values
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, row)| (1 + i as u64, row))
            .filter(|(index, _)| *index >= u64::from(first) && *index < end)
            .map(|(_, row)| Row::from_values(&headers, row))
            .collect())
    }

    async fn write_cell(&self, row: u32, column: u32, value: &str) -> Result<(), TableError> {
        let letter = column_letter(column)?;
        let cell_range = format!("{}!{letter}{row}", self.config.range);
        let url = self.values_url(&cell_range);

        let response = self
            .client
            .put(&url)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.config.access_token)
            .json(&serde_json::json!({ "values": [[value]] }))
            .send()
            .await
            .map_err(backend)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TableError::Backend {
                message: format!("Sheets API {}: {body}", status.as_u16()),
            });
        }
        debug!(cell = %cell_range, "wrote sheet cell");
        Ok(())
    }
}

/// A1-notation letter for a 1-based column index. Tracker Schema v1 sheets
/// fit within single-letter columns.
fn column_letter(column: u32) -> Result<char, TableError> {
    if (1..=26).contains(&column) {
        Ok(char::from(b'A' + u8::try_from(column - 1).unwrap_or(0)))
    } else {
        Err(TableError::Backend {
            message: format!("column {column} is outside A-Z"),
        })
    }
}

fn backend(e: reqwest::Error) -> TableError {
    TableError::Backend {
        message: e.to_string(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
