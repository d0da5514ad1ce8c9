use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors fetching E-file contents
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// No E-file under any searched location
    #[error("E-file {file_name} not found for acquisition {acquisition_id}")]
    NotFound {
        /// Acquisition identifier
        acquisition_id: String,
        /// E-file name
        file_name: String,
    },

    /// The E-file exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Supplies the already-downloaded text of an acquisition's E-file
pub trait EFileSource {
    /// Read the E-file `file_name` of acquisition `acquisition_id`
    fn read_efile(&self, acquisition_id: &str, file_name: &str) -> Result<String, SourceError>;
}

/// E-files stored on disk, either as `<root>/<acquisition id>/<file>` or `<root>/<file>`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Read E-files below `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn candidates(&self, acquisition_id: &str, file_name: &str) -> [PathBuf; 2] {
        [
            self.root.join(acquisition_id).join(file_name),
            self.root.join(file_name),
        ]
    }
}

impl EFileSource for DirectorySource {
    fn read_efile(&self, acquisition_id: &str, file_name: &str) -> Result<String, SourceError> {
        let path = self
            .candidates(acquisition_id, file_name)
            .into_iter()
            .find(|path| path.is_file())
            .ok_or_else(|| SourceError::NotFound {
                acquisition_id: acquisition_id.to_string(),
                file_name: file_name.to_string(),
            })?;

        debug!("Reading E-file {}", path.display());
        fs::read_to_string(&path).map_err(|source| SourceError::Io { path, source })
    }
}
