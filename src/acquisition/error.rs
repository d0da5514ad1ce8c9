/// Errors from matching E-file/P-file pairs within an acquisition
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairingError {
    /// More than one unclassified E-file or P-file candidate
    #[error(
        "Ambiguous pair in acquisition {acquisition_id}: E-file candidates {efile_candidates:?}, P-file candidates {pfile_candidates:?}"
    )]
    AmbiguousPair {
        /// Acquisition identifier
        acquisition_id: String,
        /// Names of all E-file candidates in listing order
        efile_candidates: Vec<String>,
        /// Names of all P-file candidates in listing order
        pfile_candidates: Vec<String>,
    },
}
