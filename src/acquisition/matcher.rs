use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::model::{Acquisition, AcquisitionFile, MatchedPair, PFILE_TYPE};
use super::PairingError;

/// How to resolve acquisitions with several candidates of one kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairPolicy {
    /// The last candidate in listing order wins (legacy behaviour)
    LastMatch,

    /// Several candidates are a [`PairingError::AmbiguousPair`]
    #[default]
    RejectAmbiguous,

    /// Several candidates log a warning and produce no pair
    SkipAmbiguous,
}

/// Role a file can play in a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// Unclassified `pfile`-typed file whose name starts with `E`
    EFile,
    /// Any other unclassified `pfile`-typed file
    PFile,
}

impl FileRole {
    /// Classify a file as an E-file or P-file candidate.
    ///
    /// An E-file candidate is never also counted as a P-file candidate.
    pub fn of(file: &AcquisitionFile) -> Option<Self> {
        if !file.has_type(PFILE_TYPE) || file.is_classified() {
            return None;
        }
        if file.name.starts_with('E') {
            Some(FileRole::EFile)
        } else {
            Some(FileRole::PFile)
        }
    }
}

/// Pairs found across many acquisitions
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Acquisitions with an unclassified pair
    pub pairs: Vec<MatchedPair>,

    /// Acquisitions rejected as ambiguous
    pub errors: Vec<PairingError>,

    /// Acquisitions without a pair
    pub unpaired: usize,
}

/// Finds the unclassified E-file/P-file pair of an acquisition
#[derive(Debug, Clone, Copy, Default)]
pub struct PairMatcher {
    policy: PairPolicy,
}

impl PairMatcher {
    /// Create a matcher with the given tie policy
    pub fn new(policy: PairPolicy) -> Self {
        Self { policy }
    }

    /// Tie policy in use
    pub fn policy(&self) -> PairPolicy {
        self.policy
    }

    /// Match one acquisition in a single pass over its files.
    ///
    /// Returns `Ok(None)` unless both an E-file and a P-file candidate exist.
    pub fn match_pair(&self, acquisition: &Acquisition) -> Result<Option<MatchedPair>, PairingError> {
        let mut efiles: Vec<&str> = Vec::new();
        let mut pfiles: Vec<&str> = Vec::new();

        for file in &acquisition.files {
            match FileRole::of(file) {
                Some(FileRole::EFile) => efiles.push(&file.name),
                Some(FileRole::PFile) => pfiles.push(&file.name),
                None => {}
            }
        }

        if efiles.is_empty() || pfiles.is_empty() {
            debug!(
                "Acquisition {}: no unclassified pair ({} E-file, {} P-file candidates)",
                acquisition.id,
                efiles.len(),
                pfiles.len()
            );
            return Ok(None);
        }

        let ambiguous = efiles.len() > 1 || pfiles.len() > 1;
        let (efile_name, pfile_name) = match self.policy {
            PairPolicy::LastMatch => (efiles[efiles.len() - 1], pfiles[pfiles.len() - 1]),
            _ if ambiguous => {
                let err = PairingError::AmbiguousPair {
                    acquisition_id: acquisition.id.clone(),
                    efile_candidates: efiles.iter().map(|name| name.to_string()).collect(),
                    pfile_candidates: pfiles.iter().map(|name| name.to_string()).collect(),
                };
                if self.policy == PairPolicy::SkipAmbiguous {
                    warn!("{}; skipping", err);
                    return Ok(None);
                }
                return Err(err);
            }
            _ => (efiles[0], pfiles[0]),
        };

        debug!(
            "Acquisition {}: paired E-file {} with P-file {}",
            acquisition.id, efile_name, pfile_name
        );

        Ok(Some(MatchedPair {
            acquisition_id: acquisition.id.clone(),
            files: acquisition.files.clone(),
            efile_name: efile_name.to_string(),
            pfile_name: pfile_name.to_string(),
            timestamp: acquisition.timestamp,
        }))
    }

    /// Match every acquisition; an ambiguous acquisition does not stop the others.
    pub fn scan<'a, I>(&self, acquisitions: I) -> ScanSummary
    where
        I: IntoIterator<Item = &'a Acquisition>,
    {
        let mut summary = ScanSummary::default();
        for acquisition in acquisitions {
            match self.match_pair(acquisition) {
                Ok(Some(pair)) => summary.pairs.push(pair),
                Ok(None) => summary.unpaired += 1,
                Err(err) => summary.errors.push(err),
            }
        }

        if summary.pairs.is_empty() {
            info!("No unclassified E-file/P-file pairs identified");
        } else {
            info!(
                "Identified {} acquisitions with an unclassified P-file and E-file",
                summary.pairs.len()
            );
        }

        summary
    }
}
