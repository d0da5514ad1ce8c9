//! # E-file Parser
//!
//! E-files are plain-text logs written by the scanner next to each P-file.
//! Every line is a `key = value` pair:
//!
//! ```text
//! series_description = Ax fMRI rest
//! slice_thickness = 3.5 mm
//! repetition_time = 2000 msec
//! flip_angle = 77 deg.
//! date_of_scan = 01/15/123
//! time_of_scan = 09:30
//! slice = 1
//! gw_point1 = -120.0 -120.0 40.0
//! gw_point2 = 120.0 -120.0 40.0
//! gw_point3 = -120.0 120.0 40.0
//! ```
//!
//! The parser turns these lines into an [`EFileRecord`]:
//!
//! - keys are trimmed and internal spaces become underscores
//! - values are coerced to Integer, Real or Text, after converting `mm`,
//!   `msec` and `deg`/`deg.` suffixes (see [`units`])
//! - a `slice` line and the three `gw_point` lines after it become one
//!   [`SliceRecord`], keyed by the full text of the `slice` line
//! - `date_of_scan` and `time_of_scan` are folded into `scan_timestamp`

mod error;
mod record;
pub mod temporal;
pub mod units;
mod value;


use chrono::NaiveDateTime;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use error::ParseError;
pub use record::{EFileRecord, SliceRecord};
pub use temporal::{DATE_OF_SCAN, SCAN_TIMESTAMP, TIME_OF_SCAN};
pub use units::{normalize, UnitLabel};
pub use value::{coerce, FieldValue};

/// Key that opens a slice block
const SLICE_KEY: &str = "slice";

/// Marker of the geometry lines consumed by a slice block
const GW_POINT: &str = "gw_point";

/// Number of geometry lines that follow a `slice` line
const SLICE_POINTS: usize = 3;

/// Parser behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Ignore whitespace-only lines instead of rejecting them as malformed
    pub skip_blank_lines: bool,

    /// Convert `MM/DD/YYY` values of any field into dates
    pub convert_dates: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            skip_blank_lines: true,
            convert_dates: true,
        }
    }
}

/// Result of parsing one E-file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedEFile {
    /// Scan date and time folded from `date_of_scan` and `time_of_scan`
    pub scan_timestamp: NaiveDateTime,

    /// All fields, with the folded timestamp stored under `scan_timestamp`
    pub record: EFileRecord,
}

impl ParsedEFile {
    /// Split into the timestamp and the record
    pub fn into_parts(self) -> (NaiveDateTime, EFileRecord) {
        (self.scan_timestamp, self.record)
    }
}

/// Line-oriented E-file parser
#[derive(Debug, Clone, Default)]
pub struct EFileParser {
    options: ParserOptions,
}

impl EFileParser {
    /// Create a parser with the given options
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// The options this parser was built with
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Read and parse an E-file from disk
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<ParsedEFile, ParseError> {
        let path = path.as_ref();
        debug!("Parsing E-file {}", path.display());
        let content = fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Parse the full text of an E-file
    pub fn parse_str(&self, content: &str) -> Result<ParsedEFile, ParseError> {
        let lines: Vec<&str> = content.lines().collect();
        self.parse_lines(&lines)
    }

    /// Parse E-file lines given in file order.
    ///
    /// Slice blocks need lookahead, so lines are addressed by index.
    pub fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<ParsedEFile, ParseError> {
        let lines: Vec<(usize, &str)> = lines
            .iter()
            .enumerate()
            .map(|(index, line)| (index + 1, line.as_ref()))
            .filter(|(_, line)| !(self.options.skip_blank_lines && line.trim().is_empty()))
            .collect();

        let mut record = EFileRecord::new();

        for (index, &(number, line)) in lines.iter().enumerate() {
            let (raw_key, raw_value) = split_field(number, line)?;
            let key = canonical_key(raw_key);

            // Geometry lines only ever belong to the preceding slice block
            if key.contains(GW_POINT) {
                continue;
            }

            if key == SLICE_KEY {
                let slice = read_slice(&lines, index)?;
                record.insert(line.trim().to_string(), FieldValue::Slice(slice));
                continue;
            }

            let value = self.type_value(raw_value);
            if record.insert(key.clone(), value).is_some() {
                debug!("Line {}: field {} overrides an earlier value", number, key);
            }
        }

        let scan_timestamp = temporal::fold_scan_timestamp(&mut record)?;
        debug!(
            "Parsed {} E-file fields, scanned at {}",
            record.len(),
            scan_timestamp
        );

        Ok(ParsedEFile {
            scan_timestamp,
            record,
        })
    }

    fn type_value(&self, raw: &str) -> FieldValue {
        let value = normalize(raw);
        if self.options.convert_dates {
            if let Some(date) = value.as_text().and_then(temporal::parse_scanner_date) {
                return FieldValue::Date(date);
            }
        }
        value
    }
}

/// Parse E-file lines with default options, returning the scan timestamp and record
pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<(NaiveDateTime, EFileRecord), ParseError> {
    EFileParser::default().parse_lines(lines).map(ParsedEFile::into_parts)
}

/// Canonical field key: trimmed, with spaces replaced by underscores
pub fn canonical_key(raw: &str) -> String {
    raw.trim().replace(' ', "_")
}

/// Split a line on its first `=` into trimmed key and value
fn split_field(number: usize, line: &str) -> Result<(&str, &str), ParseError> {
    line.split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .ok_or_else(|| ParseError::MalformedLine {
            line: number,
            text: line.to_string(),
        })
}

/// Build the slice block from the three lines following `lines[index]`
fn read_slice(lines: &[(usize, &str)], index: usize) -> Result<SliceRecord, ParseError> {
    let slice_line = lines[index].0;
    let following = &lines[index + 1..];
    if following.len() < SLICE_POINTS {
        return Err(ParseError::TruncatedRecord {
            line: slice_line,
            found: following.len(),
        });
    }

    let point = |offset: usize| -> Result<String, ParseError> {
        let (number, line) = following[offset];
        let (raw_key, raw_value) = split_field(number, line)?;
        if !canonical_key(raw_key).contains(GW_POINT) {
            warn!(
                "Line {}: slice at line {} expects a gw_point line, found key {:?}",
                number, slice_line, raw_key
            );
        }
        Ok(raw_value.to_string())
    };

    Ok(SliceRecord::new(point(0)?, point(1)?, point(2)?))
}
