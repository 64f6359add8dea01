//! Ledger date formatting.
//!
//! Join/leave dates are written as fixed `MM/DD/YYYY` strings, rendered in
//! the mapping's configured IANA timezone so a midnight run lands on the
//! correct calendar day for the team.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::SheetError;

/// Format `now` as the ledger date string for the given timezone name.
pub fn ledger_date(now: DateTime<Utc>, timezone: &str) -> Result<String, SheetError> {
    let tz = Tz::from_str(timezone)
        .map_err(|_| SheetError::UnknownTimezone(timezone.to_string()))?;
    Ok(now.with_timezone(&tz).format("%m/%d/%Y").to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn formats_fixed_month_day_year() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).single().expect("time");
        assert_eq!(ledger_date(now, "UTC").expect("date"), "08/25/2026");
    }

    #[test]
    fn timezone_shifts_the_calendar_day() {
        // 03:00 UTC on the 25th is still the 24th in New York.
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 3, 0, 0).single().expect("time");
        assert_eq!(
            ledger_date(now, "America/New_York").expect("date"),
            "08/24/2026"
        );
        assert_eq!(ledger_date(now, "UTC").expect("date"), "08/25/2026");
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        let now = Utc::now();
        let err = ledger_date(now, "Mars/Olympus_Mons").expect_err("unknown zone");
        assert!(matches!(err, SheetError::UnknownTimezone(_)));
    }
}
