//! Ledger lookups and writes over a [`SheetValues`] transport.
//!
//! Lookups read the full configured data range and scan **backwards**: a
//! user can have several closed-out periods, and the most recent row is the
//! operative one — a forward scan would pick a stale entry first.
//!
//! The store is mechanical; idempotence (no duplicate same-day join) and the
//! close-out guard are enforced by its callers in roster-engine.

use std::sync::Arc;

use async_trait::async_trait;

use roster_core::types::{SheetMapping, Username};

use crate::date::ledger_date;
use crate::error::SheetError;
use crate::range::row_address;
use crate::row::{LedgerRow, DISPLAY_NAME_COL, USERNAME_COL};

/// Raw spreadsheet value transport. One implementor speaks the Google
/// Sheets REST API; tests substitute an in-memory sheet.
#[async_trait]
pub trait SheetValues: Send + Sync {
    /// Read all rows in `range`.
    async fn get(&self, spreadsheet_id: &str, range: &str) -> Result<Vec<Vec<String>>, SheetError>;

    /// Append one row after the last data row of `range`.
    async fn append(
        &self,
        spreadsheet_id: &str,
        range: &str,
        row: Vec<String>,
    ) -> Result<(), SheetError>;

    /// Overwrite the row at `range` (a single-row A1 address).
    async fn update(
        &self,
        spreadsheet_id: &str,
        range: &str,
        row: Vec<String>,
    ) -> Result<(), SheetError>;
}

/// Ledger operations scoped to one [`SheetMapping`].
#[derive(Clone)]
pub struct LedgerStore {
    values: Arc<dyn SheetValues>,
    mapping: SheetMapping,
}

impl LedgerStore {
    pub fn new(values: Arc<dyn SheetValues>, mapping: SheetMapping) -> Self {
        Self { values, mapping }
    }

    /// Today's ledger date string in the mapping's timezone.
    pub fn today(&self) -> Result<String, SheetError> {
        ledger_date(chrono::Utc::now(), &self.mapping.timezone)
    }

    /// A1 address for the row at `row_index` within the data range.
    pub fn row_address(&self, row_index: usize) -> Result<String, SheetError> {
        row_address(&self.mapping.data_range, row_index)
    }

    /// Most recent row whose username column matches (case-insensitive).
    ///
    /// Rows with an empty username column never match.
    pub async fn find_last_row_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<(usize, LedgerRow)>, SheetError> {
        self.find_last_row(USERNAME_COL, |cell| {
            cell.to_lowercase() == username.as_str()
        })
        .await
    }

    /// Most recent row whose display-name column matches exactly.
    ///
    /// Used when a username is not yet known for the user.
    pub async fn find_last_row_by_display_name(
        &self,
        name: &str,
    ) -> Result<Option<(usize, LedgerRow)>, SheetError> {
        self.find_last_row(DISPLAY_NAME_COL, |cell| cell == name).await
    }

    async fn find_last_row(
        &self,
        column: usize,
        matches: impl Fn(&str) -> bool,
    ) -> Result<Option<(usize, LedgerRow)>, SheetError> {
        let rows = self
            .values
            .get(&self.mapping.spreadsheet_id, &self.mapping.data_range)
            .await?;

        for (index, cells) in rows.into_iter().enumerate().rev() {
            let row = LedgerRow::new(cells);
            let cell = row.cell(column);
            if !cell.is_empty() && matches(cell) {
                return Ok(Some((index, row)));
            }
        }
        Ok(None)
    }

    /// Append a new trailing row. Duplicate-guarding is the caller's job.
    pub async fn append(&self, row: &LedgerRow) -> Result<(), SheetError> {
        self.values
            .append(
                &self.mapping.spreadsheet_id,
                &self.mapping.data_range,
                row.to_cells(),
            )
            .await
    }

    /// Overwrite the row at `row_index` in place.
    pub async fn update(&self, row_index: usize, row: &LedgerRow) -> Result<(), SheetError> {
        let address = self.row_address(row_index)?;
        self.values
            .update(&self.mapping.spreadsheet_id, &address, row.to_cells())
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
