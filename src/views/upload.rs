// Upload view: file picker hint, selection and the last submission status

use super::{Screen, ScreenBody, StatusLine};
use crate::error::{ErrorCode, UploadError};
use crate::navigation::{NavigationState, Route};
use crate::upload::{RecordingFile, UploadPhase};

pub const UPLOAD_HEADING: &str = "Upload EEG File";

/// Presentation state of the upload form
#[derive(Debug, Clone, Default)]
pub struct UploadView {
    status: Option<StatusLine>,
}

impl UploadView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    /// Record the outcome of a submission for display
    pub fn record_result(&mut self, result: &Result<NavigationState, UploadError>) {
        self.status = Some(match result {
            Ok(state) => StatusLine::Info(format!(
                "Uploaded {}",
                state
                    .response()
                    .filename
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .unwrap_or("recording")
            )),
            Err(err) => StatusLine::Error(err.message()),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn render(
        &self,
        accept: &str,
        selected: Option<&RecordingFile>,
        phase: UploadPhase,
    ) -> Screen {
        Screen::new(
            Route::Upload,
            UPLOAD_HEADING,
            ScreenBody::UploadForm {
                accept: accept.to_string(),
                selected: selected.map(RecordingFile::file_name),
                submitting: phase == UploadPhase::Submitting,
                status: self.status.clone(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::UploadResponse;

    #[test]
    fn test_fresh_form() {
        let screen = UploadView::new().render(".edf", None, UploadPhase::Idle);
        assert_eq!(screen.heading, "Upload EEG File");
        assert_eq!(
            screen.body,
            ScreenBody::UploadForm {
                accept: ".edf".to_string(),
                selected: None,
                submitting: false,
                status: None,
            }
        );
    }

    #[test]
    fn test_error_status_shows_user_message() {
        let mut view = UploadView::new();
        view.record_result(&Err(UploadError::ServerRejected {
            status: 500,
            error: Some("bad file".to_string()),
        }));
        let screen = view.render(
            ".edf",
            Some(&RecordingFile::from_bytes("a.edf", vec![])),
            UploadPhase::Idle,
        );
        assert_eq!(screen.error_text(), Some("bad file"));
    }

    #[test]
    fn test_success_status_names_file() {
        let mut view = UploadView::new();
        view.record_result(&Ok(NavigationState::new(UploadResponse {
            filename: Some("a.edf".to_string()),
            ..UploadResponse::default()
        })));
        assert_eq!(
            view.status(),
            Some(&StatusLine::Info("Uploaded a.edf".to_string()))
        );
        view.clear_status();
        assert!(view.status().is_none());
    }
}
