// Upload error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Upload error code constants
///
/// Single source of truth for the codes reported by the upload orchestrator.
///
/// Error code range: 1001-1008
pub struct UploadErrorCodes {}

impl UploadErrorCodes {
    /// Submit was requested before a recording file was selected
    pub const NO_FILE_SELECTED: i32 = 1001;

    /// A submission is already pending
    pub const SUBMISSION_IN_PROGRESS: i32 = 1002;

    /// Network failure or unreadable response body
    pub const TRANSPORT_FAILURE: i32 = 1003;

    /// The metrics service answered with a non-success status
    pub const SERVER_REJECTED: i32 = 1004;

    /// No response within the configured upload timeout
    pub const TIMEOUT: i32 = 1005;

    /// The submission was cancelled before it resolved
    pub const CANCELLED: i32 = 1006;

    /// The selected file could not be read from disk
    pub const FILE_UNREADABLE: i32 = 1007;

    /// Orchestrator state lock was poisoned
    pub const STATE_POISONED: i32 = 1008;
}

/// Fallback text when the service gives no usable error message
pub const GENERIC_UPLOAD_FAILURE: &str = "Upload failed";

/// Log an upload error with structured context
///
/// Emits a single line with the error code, the component and the
/// user-visible message.
pub fn log_upload_error(err: &UploadError, context: &str) {
    error!(
        "Upload error in {}: code={}, component=UploadOrchestrator, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Upload-related errors
///
/// All of these are terminal for the current attempt. None is retried
/// automatically; the user re-initiates the upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadError {
    /// No recording file selected
    NoFileSelected,

    /// A second submit arrived while one was pending
    SubmissionAlreadyInProgress,

    /// Network/transport failure or body-parse failure
    TransportFailure { reason: String },

    /// Non-success HTTP status, with the server-provided error if any
    ServerRejected { status: u16, error: Option<String> },

    /// No response within the configured timeout
    Timeout { after_secs: u64 },

    /// Submission cancelled (view left or explicit cancel)
    Cancelled,

    /// Selected file could not be read
    FileUnreadable { path: String, reason: String },

    /// Orchestrator state lock poisoned
    StatePoisoned,
}

impl ErrorCode for UploadError {
    fn code(&self) -> i32 {
        match self {
            UploadError::NoFileSelected => UploadErrorCodes::NO_FILE_SELECTED,
            UploadError::SubmissionAlreadyInProgress => UploadErrorCodes::SUBMISSION_IN_PROGRESS,
            UploadError::TransportFailure { .. } => UploadErrorCodes::TRANSPORT_FAILURE,
            UploadError::ServerRejected { .. } => UploadErrorCodes::SERVER_REJECTED,
            UploadError::Timeout { .. } => UploadErrorCodes::TIMEOUT,
            UploadError::Cancelled => UploadErrorCodes::CANCELLED,
            UploadError::FileUnreadable { .. } => UploadErrorCodes::FILE_UNREADABLE,
            UploadError::StatePoisoned => UploadErrorCodes::STATE_POISONED,
        }
    }

    fn message(&self) -> String {
        match self {
            UploadError::NoFileSelected => "Please select a file".to_string(),
            UploadError::SubmissionAlreadyInProgress => {
                "An upload is already in progress".to_string()
            }
            UploadError::TransportFailure { reason } => format!("Upload failed: {}", reason),
            UploadError::ServerRejected { error, .. } => match error.as_deref() {
                Some(text) if !text.trim().is_empty() => text.to_string(),
                _ => GENERIC_UPLOAD_FAILURE.to_string(),
            },
            UploadError::Timeout { after_secs } => {
                format!("Upload failed: no response within {}s", after_secs)
            }
            UploadError::Cancelled => "Upload cancelled".to_string(),
            UploadError::FileUnreadable { path, reason } => {
                format!("Upload failed: could not read {}: {}", path, reason)
            }
            UploadError::StatePoisoned => "Upload state lock poisoned".to_string(),
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UploadError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for UploadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_error_codes() {
        assert_eq!(
            UploadError::NoFileSelected.code(),
            UploadErrorCodes::NO_FILE_SELECTED
        );
        assert_eq!(
            UploadError::SubmissionAlreadyInProgress.code(),
            UploadErrorCodes::SUBMISSION_IN_PROGRESS
        );
        assert_eq!(
            UploadError::TransportFailure {
                reason: "test".to_string()
            }
            .code(),
            UploadErrorCodes::TRANSPORT_FAILURE
        );
        assert_eq!(
            UploadError::ServerRejected {
                status: 500,
                error: None
            }
            .code(),
            UploadErrorCodes::SERVER_REJECTED
        );
        assert_eq!(
            UploadError::Timeout { after_secs: 5 }.code(),
            UploadErrorCodes::TIMEOUT
        );
        assert_eq!(UploadError::Cancelled.code(), UploadErrorCodes::CANCELLED);
        assert_eq!(UploadError::StatePoisoned.code(), 1008);
    }

    #[test]
    fn test_server_rejected_prefers_server_message() {
        let err = UploadError::ServerRejected {
            status: 500,
            error: Some("bad file".to_string()),
        };
        assert_eq!(err.message(), "bad file");

        let err = UploadError::ServerRejected {
            status: 502,
            error: None,
        };
        assert_eq!(err.message(), "Upload failed");

        let err = UploadError::ServerRejected {
            status: 400,
            error: Some("   ".to_string()),
        };
        assert_eq!(err.message(), "Upload failed");
    }

    #[test]
    fn test_transport_failure_includes_reason() {
        let err = UploadError::TransportFailure {
            reason: "connection refused".to_string(),
        };
        assert_eq!(err.message(), "Upload failed: connection refused");
    }

    #[test]
    fn test_no_file_selected_prompt() {
        assert_eq!(UploadError::NoFileSelected.message(), "Please select a file");
    }

    #[test]
    fn test_upload_error_display() {
        let err = UploadError::Cancelled;
        let display = format!("{}", err);
        assert!(display.contains("UploadError"));
        assert!(display.contains("1006"));
    }
}
