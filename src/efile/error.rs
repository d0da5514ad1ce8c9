/// Errors that abort the parse of a single E-file
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// I/O error reading the E-file
    #[error("Failed to read E-file: {0}")]
    Io(#[from] std::io::Error),

    /// A line has no `=` separator
    #[error("Malformed line {line}: no '=' separator in {text:?}")]
    MalformedLine {
        /// 1-based line number in the source
        line: usize,
        /// The offending line
        text: String,
    },

    /// A `slice` line is not followed by three more lines
    #[error("Truncated slice record at line {line}: expected 3 gw_point lines, found {found}")]
    TruncatedRecord {
        /// 1-based line number of the `slice` line
        line: usize,
        /// Number of lines available after it
        found: usize,
    },

    /// Scan date or time present but not in the scanner's format
    #[error("Bad {field} format: {value:?}")]
    BadTemporalFormat {
        /// Field key
        field: &'static str,
        /// Value as found in the record
        value: String,
    },

    /// A required field is absent
    #[error("Missing required E-file field: {0}")]
    MissingField(&'static str),
}
