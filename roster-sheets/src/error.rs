//! Error types for roster-sheets.

use thiserror::Error;

/// All errors that can arise from ledger operations.
///
/// `NoOpenEntry`, `AlreadyClosed` and `InvalidRange` indicate a data or
/// configuration inconsistency and always propagate to the caller uncaught.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The configured data range matches neither the sheet-name nor the
    /// row/column span grammar.
    #[error("invalid data range: {0}")]
    InvalidRange(String),

    /// The mapping's timezone is not a known IANA zone name.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Non-success response from the spreadsheet service.
    #[error("sheets API error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// Transport-level failure reaching the spreadsheet service.
    #[error("sheets transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Leave processing found no ledger row at all for the user.
    #[error("no ledger entry found for {username}")]
    NoOpenEntry { username: String },

    /// Leave processing found a last row whose leave date is already set.
    #[error("last ledger entry for {username} already has a leave date")]
    AlreadyClosed { username: String },
}
