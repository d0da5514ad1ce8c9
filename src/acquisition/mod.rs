//! # Acquisition Pairing
//!
//! An acquisition groups the files produced by one scan event. Before
//! classification, the raw P-file and its E-file are both tagged `pfile` and
//! carry no measurement. This module finds that unclassified pair.

mod error;
mod matcher;
mod model;


pub use error::PairingError;
pub use matcher::{FileRole, PairMatcher, PairPolicy, ScanSummary};
pub use model::{Acquisition, AcquisitionFile, MatchedPair, PFILE_TYPE};
