// Recording file handles and the per-submission request

use std::path::{Path, PathBuf};

use crate::error::UploadError;

/// A recording chosen by the user
///
/// Path-backed files are read only when a submission starts, so selecting
/// a file never touches the disk.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingFile {
    Path(PathBuf),
    Memory { file_name: String, bytes: Vec<u8> },
}

impl RecordingFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        RecordingFile::Path(path.into())
    }

    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        RecordingFile::Memory {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Name sent as the multipart filename
    pub fn file_name(&self) -> String {
        match self {
            RecordingFile::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            RecordingFile::Memory { file_name, .. } => file_name.clone(),
        }
    }

    /// Case-insensitive extension check, e.g. `has_extension(".edf")`
    ///
    /// Only used as a picker hint; submissions are not filtered by it.
    pub fn has_extension(&self, extension: &str) -> bool {
        let wanted = extension.trim_start_matches('.');
        Path::new(&self.file_name())
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
            .unwrap_or(false)
    }

    /// Load the file contents
    pub async fn read_bytes(&self) -> Result<Vec<u8>, UploadError> {
        match self {
            RecordingFile::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|err| UploadError::FileUnreadable {
                        path: path.display().to_string(),
                        reason: err.to_string(),
                    })
            }
            RecordingFile::Memory { bytes, .. } => Ok(bytes.clone()),
        }
    }
}

/// Multipart body for one submission, dropped once it resolves
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub field_name: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}
