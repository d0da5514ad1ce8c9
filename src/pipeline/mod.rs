//! # Classification Pipeline
//!
//! Runs pairing, E-file parsing and propagation over a batch of acquisitions:
//!
//! 1. [`PairMatcher`] finds the unclassified E-file/P-file pair
//! 2. an [`EFileSource`] supplies the E-file text
//! 3. [`EFileParser`] builds the typed record
//! 4. [`propagate`](crate::classify::propagate) derives label and metadata assignments
//!
//! Each acquisition is independent. A failure is recorded in the
//! [`ClassificationReport`] and processing moves on to the next acquisition.

mod report;
mod source;


use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::acquisition::{Acquisition, PairMatcher, PairPolicy};
use crate::classify::{classify, MeasurementInference};
use crate::efile::{EFileParser, ParserOptions};

pub use report::{AcquisitionReport, ClassificationReport, Outcome};
pub use source::{DirectorySource, EFileSource, SourceError};

/// Settings shared by every acquisition of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    /// E-file parser switches
    pub parser: ParserOptions,

    /// How ambiguous acquisitions are handled
    pub policy: PairPolicy,
}

/// Classifies the unclassified P-files of many acquisitions
#[derive(Debug, Clone)]
pub struct Classifier<M> {
    parser: EFileParser,
    matcher: PairMatcher,
    inference: M,
}

impl<M: MeasurementInference> Classifier<M> {
    /// Create a classifier using `inference` to label series descriptions
    pub fn new(options: ClassifierOptions, inference: M) -> Self {
        Self {
            parser: EFileParser::new(options.parser),
            matcher: PairMatcher::new(options.policy),
            inference,
        }
    }

    /// Match, parse and classify a single acquisition
    pub fn classify_acquisition<S>(&self, acquisition: &Acquisition, source: &S) -> Outcome
    where
        S: EFileSource + ?Sized,
    {
        let pair = match self.matcher.match_pair(acquisition) {
            Ok(Some(pair)) => pair,
            Ok(None) => return Outcome::Skipped,
            Err(err) => return failed(&acquisition.id, err),
        };

        let content = match source.read_efile(&pair.acquisition_id, &pair.efile_name) {
            Ok(content) => content,
            Err(err) => return failed(&acquisition.id, err),
        };

        match classify(&pair, &content, &self.parser, &self.inference) {
            Ok(propagation) => {
                info!(
                    "Acquisition {}: {} classified as {}",
                    acquisition.id, pair.pfile_name, propagation.measurement
                );
                Outcome::Classified(propagation)
            }
            Err(err) => failed(&acquisition.id, err),
        }
    }

    /// Classify every acquisition, in order
    pub fn run<'a, I, S>(&self, acquisitions: I, source: &S) -> ClassificationReport
    where
        I: IntoIterator<Item = &'a Acquisition>,
        S: EFileSource + ?Sized,
    {
        let mut report = ClassificationReport::new();
        for acquisition in acquisitions {
            let outcome = self.classify_acquisition(acquisition, source);
            report.add(acquisition.id.clone(), outcome);
        }

        info!(
            "Classified {} acquisitions ({} skipped, {} failed)",
            report.classified_count(),
            report.skipped_count(),
            report.failure_count()
        );
        report
    }
}

fn failed(acquisition_id: &str, err: impl std::fmt::Display) -> Outcome {
    warn!("Acquisition {}: {}", acquisition_id, err);
    Outcome::Failed {
        reason: err.to_string(),
    }
}
