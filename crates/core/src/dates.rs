//! Date helpers
//!
//! Dates travel in two formats: `DD.MM.YYYY` in forms and on screen, and
//! ISO `YYYY-MM-DD` in storage. Creation timestamps are stored as
//! `YYYY-MM-DD HH:MM:SS`.

use crate::{Error, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

pub const DISPLAY_FORMAT: &str = "%d.%m.%Y";
pub const STORAGE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a `DD.MM.YYYY` date
pub fn parse_display_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DISPLAY_FORMAT)
        .map_err(|_| Error::InvalidDate(value.to_string()))
}

/// Convert `DD.MM.YYYY` to `YYYY-MM-DD`
pub fn format_storage_date(value: &str) -> Result<String> {
    Ok(parse_display_date(value)?.format(STORAGE_FORMAT).to_string())
}

/// Format a stored date or timestamp for display
///
/// Values that already contain a `.` are assumed to be display dates and
/// returned as-is. Unparseable values are returned unchanged.
pub fn format_display_date(value: &str) -> String {
    if value.is_empty() || value.contains('.') {
        return value.to_string();
    }

    match parse_any(value) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => value.to_string(),
    }
}

/// Whether a date lies strictly before `today`
///
/// Accepts display, storage and timestamp formats. Unparseable values are
/// never considered expired.
pub fn is_date_expired(value: &str, today: NaiveDate) -> bool {
    parse_any(value).map(|date| date < today).unwrap_or(false)
}

/// The date 30 days after `today`, formatted for display
pub fn thirty_days_from(today: NaiveDate) -> String {
    (today + Duration::days(30)).format(DISPLAY_FORMAT).to_string()
}

/// Today's local date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn parse_any(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, STORAGE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(value, DISPLAY_FORMAT))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
                .ok()
                .map(|ts| ts.date())
        })
}
