//! Sortable timestamp strings.
//!
//! Records store instants as UTC strings in `YYYY-MM-DD HH:MM:SS` form, which
//! sort lexically in the same order as chronologically. That lets the
//! soft-delete check be a plain string comparison on every SQL engine.

use chrono::{DateTime, NaiveDateTime, Utc};

/// `chrono` format string for stored timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render an instant in the stored form, truncated to whole seconds.
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp.
///
/// RFC 3339 strings are accepted as well, since some drivers hand those back
/// for datetime columns. Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|instant| instant.with_timezone(&Utc))
        })
}
