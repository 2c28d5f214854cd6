//! Field coercers: total functions from raw text to typed values.
//!
//! Every coercer maps malformed input to `None` rather than failing, so the
//! cleaner never sees a parse error. Permissive byte decoding happens
//! upstream at CSV read time; coercers only ever see valid `str`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters stripped before parsing float columns.
static FLOAT_JUNK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.\-]").unwrap());

/// Characters stripped before parsing integer columns.
static INT_JUNK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9\-]").unwrap());

/// Date formats tried in order, ISO first.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Trim a text value; empty or whitespace-only becomes absent.
pub fn coerce_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a float after stripping everything but digits, `.` and `-`.
///
/// Currency markers and thousands separators fall away ("$1,250.00" parses
/// as 1250.0); anything unparseable after stripping is absent.
pub fn coerce_float(value: &str) -> Option<f64> {
    let stripped = FLOAT_JUNK.replace_all(value, "");
    if stripped.is_empty() {
        return None;
    }
    stripped.parse().ok()
}

/// Parse an integer after stripping everything but digits and `-`.
pub fn coerce_int(value: &str) -> Option<i64> {
    let stripped = INT_JUNK.replace_all(value, "");
    if stripped.is_empty() {
        return None;
    }
    stripped.parse().ok()
}

/// Parse a float with no character stripping.
///
/// Non-finite parses ("NaN", "inf") count as absent, matching the
/// missing-value semantics of the source feed.
pub fn coerce_number(value: &str) -> Option<f64> {
    value.trim().parse().ok().filter(|v: &f64| v.is_finite())
}

/// Parse a calendar date, trying each supported format in order.
pub fn coerce_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}
