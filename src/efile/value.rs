use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

use super::record::SliceRecord;
use super::temporal::SCANNER_EPOCH_YEAR;

/// A typed value stored in an [`EFileRecord`](super::EFileRecord).
///
/// Serializes untagged, so numbers stay JSON numbers and text stays a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Whole number with no fractional part in the source text
    Integer(i64),

    /// Finite real number (also the result of every `mm`/`msec` conversion)
    Real(f64),

    /// Anything without a lossless numeric reading, kept verbatim
    Text(String),

    /// Scanner calendar date (`MM/DD/YYY`, year offset from 1900)
    Date(NaiveDate),

    /// Date and time of day, only produced by folding `date_of_scan`/`time_of_scan`
    Timestamp(NaiveDateTime),

    /// Nested slice geometry block
    Slice(SliceRecord),
}

impl FieldValue {
    /// Numeric view of Integer and Real values
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(value) => Some(*value as f64),
            FieldValue::Real(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer view, only for values that were integers in the source
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow the text of a Text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the slice geometry of a Slice value
    pub fn as_slice(&self) -> Option<&SliceRecord> {
        match self {
            FieldValue::Slice(slice) => Some(slice),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{}", value),
            // Debug keeps a decimal point or exponent, so the text never reads back as an Integer
            FieldValue::Real(value) => write!(f, "{:?}", value),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Date(date) => write!(
                f,
                "{:02}/{:02}/{:03}",
                date.month(),
                date.day(),
                date.year() - SCANNER_EPOCH_YEAR
            ),
            FieldValue::Timestamp(timestamp) => write!(f, "{}", timestamp.format("%Y-%m-%d %H:%M")),
            FieldValue::Slice(slice) => write!(
                f,
                "[{}, {}, {}]",
                slice.gw_point1, slice.gw_point2, slice.gw_point3
            ),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Real(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Convert a raw token into an Integer, else a Real, else leave it as Text.
///
/// Both numeric parses must consume the whole trimmed token. Non-finite
/// readings (`inf`, `nan`, overflowing exponents) stay Text. Never fails.
pub fn coerce(text: &str) -> FieldValue {
    let token = text.trim();

    if let Ok(value) = token.parse::<i64>() {
        return FieldValue::Integer(value);
    }

    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => FieldValue::Real(value),
        _ => FieldValue::Text(text.to_string()),
    }
}
