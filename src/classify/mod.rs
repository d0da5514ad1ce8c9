//! # Classification Propagation
//!
//! Once an acquisition's E-file is parsed, its series description decides the
//! measurement of the P-file and of every file derived from it. This module
//! works out which files receive that measurement and which receive the full
//! parsed record. The label inference itself is supplied by the caller through
//! [`MeasurementInference`].

mod error;
mod inference;
mod propagate;

#[cfg(test)]
mod tests;

pub use error::ClassifyError;
pub use inference::{LabelRule, LabelTable, MeasurementInference, MeasurementLabel};
pub use propagate::{
    propagate, LabelAssignment, MetadataAssignment, Propagation, PHYSIO_MARKER,
    SERIES_DESCRIPTION,
};

use crate::acquisition::MatchedPair;
use crate::efile::EFileParser;

/// Parse the pair's E-file contents and derive its assignments
pub fn classify<M>(
    pair: &MatchedPair,
    efile_content: &str,
    parser: &EFileParser,
    inference: &M,
) -> Result<Propagation, ClassifyError>
where
    M: MeasurementInference + ?Sized,
{
    let parsed = parser.parse_str(efile_content)?;
    propagate(pair, &parsed, inference)
}
