//! Date handling for the inventory.
//!
//! Three textual forms are in play:
//! - `MM/DD/YYYY` for the startup CSV and on-screen display
//! - `YYYY-MM-DD HH:MM:SS` for backup files
//! - `YYYY-MM-DD HH:MM:SS.f` inside the database, keeping sub-second precision

use crate::error::{InventoryError, Result};
use chrono::{NaiveDate, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%m/%d/%Y";
const BACKUP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const STORAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parses a `MM/DD/YYYY` date into midnight of that day.
///
/// Month and day may be written without zero padding ("3/4/2018").
/// Other separators, trailing text and impossible dates are rejected.
pub fn parse_display_date(s: &str) -> Result<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(s, DISPLAY_FORMAT).map_err(|e| {
        InventoryError::format(format!("date '{s}' is not a valid MM/DD/YYYY date: {e}"))
    })?;
    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| InventoryError::format(format!("date '{s}' has no midnight")))
}

/// Renders a timestamp as `MM/DD/YYYY`
pub fn format_display_date(ts: &NaiveDateTime) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

/// Renders a timestamp as `YYYY-MM-DD HH:MM:SS` for backup files
pub fn format_backup_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(BACKUP_FORMAT).to_string()
}

/// Parses the `YYYY-MM-DD HH:MM:SS` form written to backup files
pub fn parse_backup_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, BACKUP_FORMAT).map_err(|e| {
        InventoryError::format(format!(
            "timestamp '{s}' is not in YYYY-MM-DD HH:MM:SS format: {e}"
        ))
    })
}

pub(crate) fn to_storage(ts: &NaiveDateTime) -> String {
    ts.format(STORAGE_FORMAT).to_string()
}

pub(crate) fn from_storage(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, STORAGE_FORMAT).ok()
}

/// Current local wall-clock time
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[cfg(test)]
#[path = "dates_tests.rs"]
mod tests;
