use crate::efile::ParseError;

/// Errors that abort classification of one acquisition
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// The parsed E-file lacks a field classification depends on
    #[error("Missing required E-file field: {0}")]
    MissingField(&'static str),

    /// The E-file could not be parsed
    #[error("E-file parse error: {0}")]
    Parse(#[from] ParseError),
}
