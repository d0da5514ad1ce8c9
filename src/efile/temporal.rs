//! Scanner date/time fields and their fold into one scan timestamp.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ParseError;
use super::record::EFileRecord;
use super::value::FieldValue;

/// Key of the scan date field (`MM/DD/YYY`)
pub const DATE_OF_SCAN: &str = "date_of_scan";

/// Key of the scan time field (`HH:MM`, 24-hour)
pub const TIME_OF_SCAN: &str = "time_of_scan";

/// Key under which the folded timestamp is stored
pub const SCAN_TIMESTAMP: &str = "scan_timestamp";

/// Scanner years are written as an offset from this year
pub(crate) const SCANNER_EPOCH_YEAR: i32 = 1900;

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{3})$").expect("date pattern is a valid regex"));

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2}):(\d{2})$").expect("time pattern is a valid regex"));

/// Parse a `MM/DD/YYY` scanner date. Returns `None` for other shapes and
/// for dates that do not exist on the calendar.
pub fn parse_scanner_date(text: &str) -> Option<NaiveDate> {
    let captures = DATE_PATTERN.captures(text.trim())?;
    let month: u32 = captures[1].parse().ok()?;
    let day: u32 = captures[2].parse().ok()?;
    let year_offset: i32 = captures[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year_offset + SCANNER_EPOCH_YEAR, month, day)
}

/// Parse a 24-hour `HH:MM` scanner time
pub fn parse_scanner_time(text: &str) -> Option<NaiveTime> {
    let captures = TIME_PATTERN.captures(text.trim())?;
    let hour: u32 = captures[1].parse().ok()?;
    let minute: u32 = captures[2].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Replace `date_of_scan` and `time_of_scan` with a single `scan_timestamp`.
pub(crate) fn fold_scan_timestamp(record: &mut EFileRecord) -> Result<NaiveDateTime, ParseError> {
    let date_value = record
        .get(DATE_OF_SCAN)
        .ok_or(ParseError::MissingField(DATE_OF_SCAN))?;
    let time_value = record
        .get(TIME_OF_SCAN)
        .ok_or(ParseError::MissingField(TIME_OF_SCAN))?;

    let date = match date_value {
        FieldValue::Date(date) => Some(*date),
        other => parse_scanner_date(&other.to_string()),
    }
    .ok_or_else(|| ParseError::BadTemporalFormat {
        field: DATE_OF_SCAN,
        value: date_value.to_string(),
    })?;

    let time = parse_scanner_time(&time_value.to_string()).ok_or_else(|| {
        ParseError::BadTemporalFormat {
            field: TIME_OF_SCAN,
            value: time_value.to_string(),
        }
    })?;

    let timestamp = date.and_time(time);
    record.remove(DATE_OF_SCAN);
    record.remove(TIME_OF_SCAN);
    let replaced = record.insert(SCAN_TIMESTAMP.to_string(), FieldValue::Timestamp(timestamp));
    if let Some(previous) = replaced {
        warn!(
            "E-file field '{}' = '{}' replaced by the folded scan timestamp",
            SCAN_TIMESTAMP, previous
        );
    }

    Ok(timestamp)
}
