use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// File type tag carried by both E-files and P-files
pub const PFILE_TYPE: &str = "pfile";

/// One file attached to an acquisition, as listed by the remote store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionFile {
    /// File name (unique within the acquisition)
    pub name: String,

    /// File type tag, e.g. "pfile" or "nifti"
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,

    /// Existing measurement classification; empty when unclassified
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub measurements: Vec<String>,
}

impl AcquisitionFile {
    /// Create an untyped, unclassified file entry
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the file type tag
    pub fn with_type(mut self, file_type: impl Into<String>) -> Self {
        self.file_type = Some(file_type.into());
        self
    }

    /// Add an existing measurement classification
    pub fn with_measurement(mut self, measurement: impl Into<String>) -> Self {
        self.measurements.push(measurement.into());
        self
    }

    /// Whether the type tag contains `tag`
    pub fn has_type(&self, tag: &str) -> bool {
        self.file_type
            .as_deref()
            .map_or(false, |file_type| file_type.contains(tag))
    }

    /// Whether the file already carries a measurement classification
    pub fn is_classified(&self) -> bool {
        !self.measurements.is_empty()
    }
}

/// A scan event and the files attached to it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acquisition {
    /// Acquisition identifier in the remote store
    #[serde(alias = "_id")]
    pub id: String,

    /// Acquisition timestamp, if the store already has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,

    /// Attached files in listing order
    #[serde(default)]
    pub files: Vec<AcquisitionFile>,
}

impl Acquisition {
    /// Create an acquisition with no timestamp
    pub fn new(id: impl Into<String>, files: Vec<AcquisitionFile>) -> Self {
        Self {
            id: id.into(),
            timestamp: None,
            files,
        }
    }

    /// Set the existing acquisition timestamp
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// An acquisition holding exactly one unclassified E-file and P-file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedPair {
    /// Acquisition identifier
    pub acquisition_id: String,

    /// Full file listing of the acquisition
    pub files: Vec<AcquisitionFile>,

    /// Name of the E-file
    pub efile_name: String,

    /// Name of the P-file
    pub pfile_name: String,

    /// Existing acquisition timestamp
    pub timestamp: Option<NaiveDateTime>,
}

impl MatchedPair {
    /// P-file name up to its first `.` (`P05120.7.gz` -> `P05120`)
    pub fn pfile_stem(&self) -> &str {
        self.pfile_name
            .split('.')
            .next()
            .unwrap_or(self.pfile_name.as_str())
    }
}
