//! The fixed, positional six-column ledger row.
//!
//! Column schema (0-indexed):
//! `0=displayName, 1=position, 2=joinDate, 3=leaveDate, 4=newHireMarker,
//! 5=username`.
//!
//! The spreadsheet service truncates trailing empty cells on read, so a
//! physically shorter row is equivalent to one padded with empty strings.
//! [`LedgerRow`] absorbs that: reads of absent cells yield `""` and writes
//! pad as needed, so deliberately empty cells are never lost or mangled.

pub const DISPLAY_NAME_COL: usize = 0;
pub const POSITION_COL: usize = 1;
pub const JOIN_DATE_COL: usize = 2;
pub const LEAVE_DATE_COL: usize = 3;
pub const NEW_HIRE_COL: usize = 4;
pub const USERNAME_COL: usize = 5;

/// Number of columns in the ledger schema.
pub const LEDGER_COLUMNS: usize = 6;

/// One ledger row. An "open" row (empty leave date) represents current
/// membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerRow {
    cells: Vec<String>,
}

impl LedgerRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell value at `index`; absent trailing cells read as `""`.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// Set cell `index`, padding intermediate cells with empty strings.
    pub fn set_cell(&mut self, index: usize, value: impl Into<String>) {
        if self.cells.len() <= index {
            self.cells.resize(index + 1, String::new());
        }
        self.cells[index] = value.into();
    }

    pub fn display_name(&self) -> &str {
        self.cell(DISPLAY_NAME_COL)
    }

    pub fn position(&self) -> &str {
        self.cell(POSITION_COL)
    }

    pub fn join_date(&self) -> &str {
        self.cell(JOIN_DATE_COL)
    }

    pub fn leave_date(&self) -> &str {
        self.cell(LEAVE_DATE_COL)
    }

    pub fn username(&self) -> &str {
        self.cell(USERNAME_COL)
    }

    /// Whether this row represents current membership.
    pub fn is_open(&self) -> bool {
        self.leave_date().is_empty()
    }

    /// The row as a full six-cell record, padded with empty strings.
    pub fn to_cells(&self) -> Vec<String> {
        let mut cells = self.cells.clone();
        if cells.len() < LEDGER_COLUMNS {
            cells.resize(LEDGER_COLUMNS, String::new());
        }
        cells
    }
}

impl From<Vec<String>> for LedgerRow {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

impl From<&[&str]> for LedgerRow {
    fn from(cells: &[&str]) -> Self {
        Self::new(cells.iter().map(|c| c.to_string()).collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
