//! Unit-suffixed E-file values.
//!
//! The scanner writes some quantities as `<number> <unit>`, e.g. `5.0 mm` or
//! `1500 msec`. Recognized labels are converted to SI-like base units:
//!
//! | Label | Canonical unit | Scale |
//! |-------|----------------|-------|
//! | `mm` | meter | / 1000 |
//! | `msec` | second | / 1000 |
//! | `deg`, `deg.` | degree | unchanged |

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::value::{coerce, FieldValue};

static UNIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?(?:\d+(?:\.\d*)?|\.\d+)) (mm|deg\.|deg|msec)$")
        .expect("unit pattern is a valid regex")
});

/// Unit label recognized on an E-file value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitLabel {
    /// `mm`
    Millimeters,
    /// `deg` or `deg.`
    Degrees,
    /// `msec`
    Milliseconds,
}

impl UnitLabel {
    /// Look up a captured label. Both degree spellings map to the same unit.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "mm" => Some(UnitLabel::Millimeters),
            "deg" | "deg." => Some(UnitLabel::Degrees),
            "msec" => Some(UnitLabel::Milliseconds),
            _ => None,
        }
    }

    /// Symbol of the unit the value is expressed in after normalization
    pub fn canonical_unit(&self) -> &'static str {
        match self {
            UnitLabel::Millimeters => "m",
            UnitLabel::Degrees => "deg",
            UnitLabel::Milliseconds => "s",
        }
    }

    /// Divisor to the canonical unit, `None` for identity
    fn divisor(&self) -> Option<f64> {
        match self {
            UnitLabel::Millimeters | UnitLabel::Milliseconds => Some(1000.0),
            UnitLabel::Degrees => None,
        }
    }

    /// Convert an already-coerced numeric value into the canonical unit.
    ///
    /// Degrees keep their coerced type; scaled units always yield a Real.
    pub fn apply(&self, value: FieldValue) -> FieldValue {
        match (self.divisor(), value.as_f64()) {
            (Some(divisor), Some(number)) => FieldValue::Real(number / divisor),
            _ => value,
        }
    }
}

impl fmt::Display for UnitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_unit())
    }
}

/// Split `<number> <label>` into its numeric text and unit label.
///
/// The whole value must match; `"5 mm"` matches, `"5mm"` and `"5 mm x"` do not.
pub fn split_unit(text: &str) -> Option<(&str, UnitLabel)> {
    let captures = UNIT_PATTERN.captures(text)?;
    let number = captures.get(1)?.as_str();
    let label = UnitLabel::from_label(captures.get(2)?.as_str())?;
    Some((number, label))
}

/// Normalize a trimmed E-file value.
///
/// Unit-labeled numbers are coerced and scaled to their canonical unit;
/// everything else goes through [`coerce`] unchanged.
pub fn normalize(text: &str) -> FieldValue {
    match split_unit(text) {
        Some((number, label)) => match coerce(number) {
            FieldValue::Text(_) => FieldValue::Text(text.to_string()),
            value => label.apply(value),
        },
        None => coerce(text),
    }
}
