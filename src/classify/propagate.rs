use chrono::NaiveDateTime;
use log::debug;
use serde::Serialize;

use crate::acquisition::MatchedPair;
use crate::efile::{EFileRecord, ParsedEFile};

use super::inference::{MeasurementInference, MeasurementLabel};
use super::ClassifyError;

/// E-file field the measurement is inferred from
pub const SERIES_DESCRIPTION: &str = "series_description";

/// Files whose name contains this marker never receive the measurement
pub const PHYSIO_MARKER: &str = "physio";

/// Measurement to store on one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelAssignment {
    /// Target file name
    pub file_name: String,
    /// Measurement label
    pub measurement: MeasurementLabel,
}

/// Parsed E-file record to store as file metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataAssignment {
    /// Target file name
    pub file_name: String,
    /// Full parsed record
    pub record: EFileRecord,
}

/// Everything classification derives for one acquisition.
///
/// Nothing here is persisted; the caller decides how to apply it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Propagation {
    /// Acquisition identifier
    pub acquisition_id: String,

    /// Measurement inferred from the series description
    pub measurement: MeasurementLabel,

    /// Files that receive the measurement
    pub labels: Vec<LabelAssignment>,

    /// Files that receive the parsed record (P-file first, then E-file)
    pub metadata: Vec<MetadataAssignment>,

    /// Scan timestamp derived from the E-file
    pub scan_timestamp: NaiveDateTime,

    /// Timestamp the acquisition already had
    pub acquisition_timestamp: Option<NaiveDateTime>,
}

impl Propagation {
    /// The derived scan timestamp, when the acquisition has none of its own
    pub fn timestamp_backfill(&self) -> Option<NaiveDateTime> {
        match self.acquisition_timestamp {
            Some(_) => None,
            None => Some(self.scan_timestamp),
        }
    }
}

/// Derive label and metadata assignments for a matched pair.
///
/// Every file whose name contains the P-file stem gets the measurement,
/// except physio recordings, and so does the paired E-file itself. The
/// parsed record goes to the P-file and E-file.
pub fn propagate<M>(
    pair: &MatchedPair,
    parsed: &ParsedEFile,
    inference: &M,
) -> Result<Propagation, ClassifyError>
where
    M: MeasurementInference + ?Sized,
{
    let description = parsed
        .record
        .get(SERIES_DESCRIPTION)
        .ok_or(ClassifyError::MissingField(SERIES_DESCRIPTION))?
        .to_string();
    let measurement = inference.infer_measurement(&description);
    debug!(
        "Acquisition {}: series description {:?} classified as {}",
        pair.acquisition_id, description, measurement
    );

    let stem = pair.pfile_stem();
    let labels: Vec<LabelAssignment> = pair
        .files
        .iter()
        .filter(|file| {
            file.name == pair.efile_name
                || (file.name.contains(stem) && !file.name.contains(PHYSIO_MARKER))
        })
        .map(|file| {
            debug!("Adding measurement {} to the file {}", measurement, file.name);
            LabelAssignment {
                file_name: file.name.clone(),
                measurement: measurement.clone(),
            }
        })
        .collect();

    // TODO: also attach the record to the reconstructed NIfTI sharing the P-file stem once it is listed reliably
    let metadata = [&pair.pfile_name, &pair.efile_name]
        .into_iter()
        .map(|file_name| MetadataAssignment {
            file_name: file_name.clone(),
            record: parsed.record.clone(),
        })
        .collect();

    Ok(Propagation {
        acquisition_id: pair.acquisition_id.clone(),
        measurement,
        labels,
        metadata,
        scan_timestamp: parsed.scan_timestamp,
        acquisition_timestamp: pair.timestamp,
    })
}
