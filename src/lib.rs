//! # pfile-classifier - Scanner E-file Parsing and P-file Classification
//!
//! `pfile_classifier` turns the plain-text E-file a scanner writes next to each
//! raw P-file into a typed metadata record, and uses it to classify the P-file
//! and the files derived from it.
//!
//! ## Key Features
//!
//! - **Typed E-file records**: `key = value` lines become Integer, Real, Text,
//!   Date or nested slice geometry values, in file order.
//!
//! - **Unit normalization**: `mm` values are stored in meters, `msec` values in
//!   seconds, `deg`/`deg.` values in degrees without the label.
//!
//! - **Scan timestamp**: `date_of_scan` (`MM/DD/YYY`, years since 1900) and
//!   `time_of_scan` (`HH:MM`) fold into a single timestamp.
//!
//! - **Pair detection**: finds the one unclassified E-file/P-file pair of an
//!   acquisition, with a configurable policy for ambiguous listings.
//!
//! - **Classification propagation**: the measurement inferred from the series
//!   description goes to every file sharing the P-file stem (physio excluded),
//!   and the parsed record goes to the P-file and E-file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pfile_classifier::acquisition::{Acquisition, AcquisitionFile, PairMatcher};
//! use pfile_classifier::classify::{propagate, MeasurementLabel};
//! use pfile_classifier::efile::EFileParser;
//!
//! let acquisition = Acquisition::new(
//!     "5a1b2c",
//!     vec![
//!         AcquisitionFile::new("P05120.7.gz").with_type("pfile"),
//!         AcquisitionFile::new("E05120.7").with_type("pfile"),
//!     ],
//! );
//!
//! if let Some(pair) = PairMatcher::default().match_pair(&acquisition)? {
//!     let parsed = EFileParser::default().parse_file(&pair.efile_name)?;
//!     let infer = |description: &str| MeasurementLabel::new(description.to_lowercase());
//!     let propagation = propagate(&pair, &parsed, &infer)?;
//!     for assignment in &propagation.labels {
//!         println!("{} -> {}", assignment.file_name, assignment.measurement);
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`efile`]: E-file parser, value coercion and unit normalization
//! - [`acquisition`]: acquisition file listings and E-file/P-file pairing
//! - [`classify`]: measurement inference seam and assignment propagation
//! - [`pipeline`]: batch orchestration with per-acquisition outcomes
//!
//! Nothing here talks to the remote store. File contents are handed in as
//! text, and assignments are returned to the caller to persist.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod acquisition;
pub mod classify;
pub mod efile;
pub mod pipeline;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::acquisition::{
        Acquisition, AcquisitionFile, MatchedPair, PairMatcher, PairPolicy, PairingError,
    };
    pub use crate::classify::{
        classify, propagate, ClassifyError, LabelAssignment, LabelTable, MeasurementInference,
        MeasurementLabel, MetadataAssignment, Propagation,
    };
    pub use crate::efile::{
        coerce, normalize, EFileParser, EFileRecord, FieldValue, ParseError, ParsedEFile,
        ParserOptions, SliceRecord,
    };
    pub use crate::pipeline::{
        ClassificationReport, Classifier, ClassifierOptions, DirectorySource, EFileSource,
        Outcome,
    };
}
