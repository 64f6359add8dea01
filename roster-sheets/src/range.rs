//! A1-notation range math.
//!
//! The configured data range is an optional sheet-name prefix plus an
//! optional span, e.g. `Data!A2:F`, `'My Sheet'!10:500`, `A:B`, or a bare
//! sheet name. [`row_address`] turns a 0-based row index within that range
//! into the A1 address of the row's first cell, which is where in-place row
//! updates are written.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SheetError;

/// Grammar for a configured data range: optional quoted or bare sheet name,
/// optional `!`, optional column span (`A10:F50`) or row span (`10:50`).
static A1_NOTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?P<sheet>(["'].+["']|[\p{L}\p{N}_]+))?!?(?P<span>([a-zA-Z]\w*:[a-zA-Z]\w*)|(\d+:\d+))?$"#)
        .expect("A1 notation grammar is valid")
});

/// First numeric row in a span, e.g. the `10` in `C10:F50`.
static SPAN_FIRST_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+):").expect("span first-row pattern is valid"));

/// Row number and everything after it in a span, replaced by the target row.
static SPAN_ROW_TAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d*:.*").expect("span row-tail pattern is valid"));

/// Compute the A1 address of row `row_index` (0-based) within `data_range`.
///
/// The target row number is `first_row + row_index`; `first_row` defaults
/// to 1 when the span carries no numeric row (bare column range or
/// full-sheet reference).
///
/// ```
/// use roster_sheets::row_address;
/// assert_eq!(row_address("sheet!C10:F50", 30).unwrap(), "sheet!C40");
/// assert_eq!(row_address("A:B", 10).unwrap(), "A11");
/// ```
pub fn row_address(data_range: &str, row_index: usize) -> Result<String, SheetError> {
    let caps = A1_NOTATION
        .captures(data_range)
        .ok_or_else(|| SheetError::InvalidRange(data_range.to_string()))?;

    let sheet = caps.name("sheet").map(|m| m.as_str()).unwrap_or("");
    let span = caps.name("span").map(|m| m.as_str()).unwrap_or("");
    if sheet.is_empty() && span.is_empty() {
        return Err(SheetError::InvalidRange(data_range.to_string()));
    }

    let first_row = SPAN_FIRST_ROW
        .captures(span)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .unwrap_or(1);
    let target_row = first_row + row_index;

    let range = if span.is_empty() {
        String::new()
    } else {
        SPAN_ROW_TAIL
            .replace(span, target_row.to_string())
            .into_owned()
    };

    let sep = if !sheet.is_empty() && !range.is_empty() {
        "!"
    } else {
        ""
    };
    Ok(format!("{sheet}{sep}{range}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
