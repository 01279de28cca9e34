// Payload validation error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Payload error code constants
///
/// Error code range: 2001-2003
pub struct PayloadErrorCodes {}

impl PayloadErrorCodes {
    /// No navigation state reached the visualization view
    pub const MISSING_STATE: i32 = 2001;

    /// A required payload field is absent
    pub const MISSING_FIELD: i32 = 2002;

    /// Channel names and metric records differ in length
    pub const CHANNEL_COUNT_MISMATCH: i32 = 2003;
}

/// Text shown for absent or incomplete upload data
pub const MISSING_DATA_MESSAGE: &str =
    "Missing or incomplete data from upload. Please try uploading again.";

/// Log a payload validation error with structured context
pub fn log_payload_error(err: &PayloadError, context: &str) {
    error!(
        "Payload error in {}: code={}, component=PayloadValidator, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Reasons a payload cannot be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Navigation carried no payload at all
    MissingState,

    /// A required field is absent
    MissingField { field: &'static str },

    /// `channel_names` and `metrics` are not positionally aligned
    ChannelCountMismatch { channels: usize, records: usize },
}

impl ErrorCode for PayloadError {
    fn code(&self) -> i32 {
        match self {
            PayloadError::MissingState => PayloadErrorCodes::MISSING_STATE,
            PayloadError::MissingField { .. } => PayloadErrorCodes::MISSING_FIELD,
            PayloadError::ChannelCountMismatch { .. } => PayloadErrorCodes::CHANNEL_COUNT_MISMATCH,
        }
    }

    fn message(&self) -> String {
        match self {
            PayloadError::MissingState | PayloadError::MissingField { .. } => {
                MISSING_DATA_MESSAGE.to_string()
            }
            PayloadError::ChannelCountMismatch { channels, records } => format!(
                "Channel/metric mismatch: {} channel names but {} metric records. Please try uploading again.",
                channels, records
            ),
        }
    }
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PayloadError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for PayloadError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_error_codes() {
        assert_eq!(PayloadError::MissingState.code(), 2001);
        assert_eq!(PayloadError::MissingField { field: "shape" }.code(), 2002);
        assert_eq!(
            PayloadError::ChannelCountMismatch {
                channels: 3,
                records: 2
            }
            .code(),
            2003
        );
    }

    #[test]
    fn test_missing_data_message_is_shared() {
        assert_eq!(PayloadError::MissingState.message(), MISSING_DATA_MESSAGE);
        assert_eq!(
            PayloadError::MissingField {
                field: "channel_names"
            }
            .message(),
            MISSING_DATA_MESSAGE
        );
    }

    #[test]
    fn test_mismatch_message_reports_counts() {
        let err = PayloadError::ChannelCountMismatch {
            channels: 3,
            records: 2,
        };
        assert!(err.message().contains("3 channel names"));
        assert!(err.message().contains("2 metric records"));
    }
}
