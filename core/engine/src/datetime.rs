//! FILENAME: core/engine/src/datetime.rs
//! PURPOSE: Calendar date recognition for imported cell values.
//! CONTEXT: Used by column type inference (is this a date column?) and by
//! the Gantt pipeline (where does this task start and end?).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use crate::cell::CellValue;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
];

/// Parses a calendar date or date-time from text.
/// Dates without a time component resolve to midnight.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Reads a cell as a point in time.
/// Numbers are taken as milliseconds since the Unix epoch.
pub fn parse_cell_date(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::Text(s) => parse_date(s),
        CellValue::Number(ms) if ms.is_finite() => {
            DateTime::from_timestamp_millis(*ms as i64).map(|dt| dt.naive_utc())
        }
        _ => None,
    }
}

/// Milliseconds since the Unix epoch, treating the value as UTC.
pub fn timestamp_millis(value: &NaiveDateTime) -> i64 {
    value.and_utc().timestamp_millis()
}
