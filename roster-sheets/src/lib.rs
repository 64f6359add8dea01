//! # roster-sheets
//!
//! The append-only membership ledger: a rectangular range in a spreadsheet,
//! one row per join/leave period.
//!
//! - [`row`] — the fixed six-column row shape
//! - [`range`] — A1-notation range math ([`row_address`])
//! - [`date`] — ledger date formatting per mapping timezone
//! - [`store`] — [`LedgerStore`] lookups and writes over a [`SheetValues`]
//!   transport
//! - [`http`] — Google Sheets REST transport

pub mod date;
pub mod error;
pub mod http;
pub mod range;
pub mod row;
pub mod store;

pub use date::ledger_date;
pub use error::SheetError;
pub use http::GoogleSheetsValues;
pub use range::row_address;
pub use row::LedgerRow;
pub use store::{LedgerStore, SheetValues};
