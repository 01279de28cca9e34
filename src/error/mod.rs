// Error types for the NeuroChaos viewer
//
// This module defines the error taxonomy for the upload and visualization
// pipeline. Every error carries a stable numeric code and a user-visible
// message so views can surface it verbatim.

mod payload;
mod upload;

pub use payload::{log_payload_error, PayloadError, PayloadErrorCodes, MISSING_DATA_MESSAGE};
pub use upload::{log_upload_error, UploadError, UploadErrorCodes, GENERIC_UPLOAD_FAILURE};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// views, the CLI and telemetry.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message shown to the user
    fn message(&self) -> String;
}
