//! Ledger business rules, layered over [`LedgerStore`].
//!
//! The store itself is mechanical; the rules here are what keep the ledger
//! consistent under repeated and concurrent event delivery:
//!
//! - a join is recorded at most once per user per day
//! - a user with no resolvable username still gets an anonymous row, to be
//!   backfilled once their profile is set
//! - a leave may only close an open row, exactly once

use tracing::{debug, info};

use roster_core::profile::UserProfile;
use roster_core::types::Username;
use roster_sheets::row::{DISPLAY_NAME_COL, JOIN_DATE_COL, LEAVE_DATE_COL, POSITION_COL, USERNAME_COL};
use roster_sheets::{LedgerRow, LedgerStore, SheetError};

/// Outcome of [`record_join`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinRecord {
    /// A new row was appended.
    Appended { new_hire: bool },
    /// The user's last row already carries today's join date; the ledger
    /// was left untouched.
    AlreadyRecordedToday,
}

/// Outcome of [`backfill_username`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackfillRecord {
    Updated,
    /// The user has no ledger row at all; nothing to backfill.
    NoRow,
    /// The last row already has a username; left untouched.
    AlreadySet,
}

/// Append a join row for `username`, unless one was already recorded today.
///
/// A returning member's display name and position are copied from their
/// most recent row; a first-time member takes the profile's display name
/// with an empty position.
pub async fn record_join(
    store: &LedgerStore,
    profile: &UserProfile,
    username: &Username,
) -> Result<JoinRecord, SheetError> {
    let today = store.today()?;
    let last = store.find_last_row_by_username(username).await?;
    debug!(user = %username, last_row = ?last.as_ref().map(|(i, _)| *i), "join row lookup");

    if let Some((_, last_row)) = &last {
        if last_row.join_date() == today {
            info!(user = %username, "join already recorded today, skipping");
            return Ok(JoinRecord::AlreadyRecordedToday);
        }
    }

    let (name, position, new_hire) = match &last {
        Some((_, row)) => (row.display_name().to_string(), row.position().to_string(), false),
        None => (profile.display_name().to_string(), String::new(), true),
    };

    let mut row = LedgerRow::default();
    row.set_cell(DISPLAY_NAME_COL, name);
    row.set_cell(POSITION_COL, position);
    row.set_cell(JOIN_DATE_COL, today);
    row.set_cell(USERNAME_COL, username.as_str());
    store.append(&row).await?;

    info!(user = %username, new_hire, "join row appended");
    Ok(JoinRecord::Appended { new_hire })
}

/// Append a join row for a user with no resolvable username.
///
/// Only the display name and join date are populated; the row is located
/// later by display name and backfilled once the profile is set.
pub async fn record_anonymous_join(
    store: &LedgerStore,
    profile: &UserProfile,
) -> Result<(), SheetError> {
    let mut row = LedgerRow::default();
    row.set_cell(DISPLAY_NAME_COL, profile.display_name());
    row.set_cell(JOIN_DATE_COL, store.today()?);
    store.append(&row).await?;

    info!(name = profile.display_name(), "anonymous join row appended");
    Ok(())
}

/// Close out the user's most recent row with today's date.
///
/// Errors with [`SheetError::NoOpenEntry`] when the user has no row at all
/// and [`SheetError::AlreadyClosed`] when the last row's leave date is
/// already set; in both cases the ledger is left untouched. All other
/// columns are written back verbatim.
pub async fn record_leave(store: &LedgerStore, username: &Username) -> Result<(), SheetError> {
    let Some((index, mut row)) = store.find_last_row_by_username(username).await? else {
        return Err(SheetError::NoOpenEntry {
            username: username.to_string(),
        });
    };
    if !row.is_open() {
        return Err(SheetError::AlreadyClosed {
            username: username.to_string(),
        });
    }

    row.set_cell(LEAVE_DATE_COL, store.today()?);
    store.update(index, &row).await?;

    info!(user = %username, "leave date set on last ledger row");
    Ok(())
}

/// Write `username` into the user's last row, located by display name.
///
/// Skips silently when the user has no row or the row already carries a
/// username. Columns 0–4 are preserved; absent trailing cells are written
/// back as empty strings rather than dropped.
pub async fn backfill_username(
    store: &LedgerStore,
    display_name: &str,
    username: &Username,
) -> Result<BackfillRecord, SheetError> {
    let Some((index, mut row)) = store.find_last_row_by_display_name(display_name).await? else {
        debug!(name = display_name, "no ledger row to backfill");
        return Ok(BackfillRecord::NoRow);
    };
    if !row.username().is_empty() {
        debug!(name = display_name, "ledger row already has a username");
        return Ok(BackfillRecord::AlreadySet);
    }

    row.set_cell(USERNAME_COL, username.as_str());
    store.update(index, &row).await?;

    info!(name = display_name, user = %username, "ledger username backfilled");
    Ok(BackfillRecord::Updated)
}
