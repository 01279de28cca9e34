// UploadOrchestrator: file selection and the single in-flight submission
//
// Phase machine: Idle → Submitting → Idle. A second submit while
// Submitting is rejected, never queued. The phase returns to Idle when the
// submission resolves, times out, is cancelled, or its future is dropped.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use log::{debug, info};
use tokio::sync::Notify;

use super::file::{RecordingFile, UploadRequest};
use super::transport::{MetricsTransport, TransportResponse};
use crate::config::UploadConfig;
use crate::error::{log_upload_error, ErrorCode, UploadError};
use crate::navigation::{NavigationState, Navigator, Route};
use crate::payload::{ErrorBody, UploadResponse};
use crate::telemetry::{self, SessionEvent};

/// Submission phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum UploadPhase {
    Idle,
    Submitting,
}

/// Owns the selected recording and drives submissions
///
/// On success the parsed response is handed to the navigator as
/// [`NavigationState`] for [`Route::Visualize`], exactly once. On failure
/// nothing navigates and the error is returned for display.
///
/// # Example
/// ```ignore
/// let orchestrator = UploadOrchestrator::new(config, transport, shell);
/// orchestrator.select_file(RecordingFile::from_path("S001R04.edf"));
/// let state = orchestrator.submit().await?;
/// ```
pub struct UploadOrchestrator {
    config: UploadConfig,
    transport: Arc<dyn MetricsTransport>,
    navigator: Arc<dyn Navigator>,
    selected: Mutex<Option<RecordingFile>>,
    phase: Mutex<UploadPhase>,
    cancel: Notify,
}

impl UploadOrchestrator {
    pub fn new(
        config: UploadConfig,
        transport: Arc<dyn MetricsTransport>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            transport,
            navigator,
            selected: Mutex::new(None),
            phase: Mutex::new(UploadPhase::Idle),
            cancel: Notify::new(),
        }
    }

    /// Replace the selected file
    ///
    /// No extension check happens here; the accepted extension is a picker
    /// hint and the metrics service does the real check.
    pub fn select_file(&self, file: RecordingFile) {
        let file_name = file.file_name();
        if !file.has_extension(&self.config.accept_extension) {
            debug!(
                "[Upload] {} does not match {}; selecting anyway",
                file_name, self.config.accept_extension
            );
        }
        *self.selected.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
        telemetry::session().record(SessionEvent::FileSelected { file_name });
    }

    pub fn selected_file(&self) -> Option<RecordingFile> {
        self.selected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn phase(&self) -> UploadPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Submit the selected file to the metrics service
    ///
    /// # Returns
    /// * `Ok(NavigationState)` - Response parsed; navigation to the
    ///   visualization route has happened
    /// * `Err(UploadError)` - Nothing navigated
    ///
    /// # Errors
    /// - `NoFileSelected` without touching the network
    /// - `SubmissionAlreadyInProgress` while another submit is pending
    /// - `FileUnreadable`, `TransportFailure`, `ServerRejected`
    /// - `Timeout` after `UploadConfig::timeout()`
    /// - `Cancelled` after [`UploadOrchestrator::cancel`]
    pub async fn submit(&self) -> Result<NavigationState, UploadError> {
        let file = match self.selected_file() {
            Some(file) => file,
            None => return Err(self.fail(UploadError::NoFileSelected)),
        };

        // Registered before entering Submitting so a cancel cannot slip past
        let cancelled = self.cancel.notified();
        tokio::pin!(cancelled);

        let _guard = self.begin().map_err(|err| self.fail(err))?;
        let file_name = file.file_name();
        info!("[Upload] Submitting {} to {}", file_name, self.config.endpoint);
        telemetry::session().record(SessionEvent::SubmissionStarted {
            file_name: file_name.clone(),
        });

        let started = Instant::now();
        let timeout = self.config.timeout();
        let outcome = tokio::select! {
            biased;
            _ = &mut cancelled => Err(UploadError::Cancelled),
            attempt = tokio::time::timeout(timeout, self.attempt(&file)) => match attempt {
                Ok(result) => result,
                Err(_) => Err(UploadError::Timeout {
                    after_secs: timeout.as_secs(),
                }),
            },
        };

        let response = outcome.map_err(|err| self.fail(err))?;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            "[Upload] {} accepted in {} ms ({} channels)",
            file_name,
            elapsed_ms,
            response.channel_names.as_ref().map_or(0, Vec::len)
        );
        telemetry::session().record(SessionEvent::SubmissionSucceeded {
            filename: response.filename.clone(),
            channels: response.channel_names.as_ref().map_or(0, Vec::len),
            elapsed_ms,
        });

        let state = NavigationState::new(response);
        self.navigator
            .navigate(Route::Visualize, Some(state.clone()));
        Ok(state)
    }

    /// Cancel the pending submission, if any
    ///
    /// Returns `true` when a submission was pending.
    pub fn cancel(&self) -> bool {
        if self.phase() == UploadPhase::Submitting {
            info!("[Upload] Cancelling pending submission");
            self.cancel.notify_waiters();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // HELPER METHODS
    // ========================================================================

    /// Move to Submitting, rejecting a second concurrent submit
    fn begin(&self) -> Result<SubmissionGuard<'_>, UploadError> {
        let mut phase = self
            .phase
            .lock()
            .map_err(|_| UploadError::StatePoisoned)?;
        if *phase == UploadPhase::Submitting {
            return Err(UploadError::SubmissionAlreadyInProgress);
        }
        *phase = UploadPhase::Submitting;
        Ok(SubmissionGuard { phase: &self.phase })
    }

    async fn attempt(&self, file: &RecordingFile) -> Result<UploadResponse, UploadError> {
        let request = UploadRequest {
            field_name: self.config.field_name.clone(),
            file_name: file.file_name(),
            bytes: file.read_bytes().await?,
        };
        let response = self.transport.send(request).await?;
        interpret_response(response)
    }

    fn fail(&self, err: UploadError) -> UploadError {
        log_upload_error(&err, "submit");
        telemetry::session().record(SessionEvent::SubmissionFailed {
            code: err.code(),
            message: err.message(),
        });
        err
    }
}

/// Map a raw response to the parsed payload or an upload error
///
/// A success body only has to be JSON; its fields are read leniently and
/// checked later by the visualization view. Failure bodies may carry an
/// `error` string.
pub fn interpret_response(response: TransportResponse) -> Result<UploadResponse, UploadError> {
    if !response.is_success() {
        let error = serde_json::from_slice::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.error);
        return Err(UploadError::ServerRejected {
            status: response.status,
            error,
        });
    }

    let body: serde_json::Value =
        serde_json::from_slice(&response.body).map_err(|err| UploadError::TransportFailure {
            reason: format!("invalid response body: {}", err),
        })?;

    if log::log_enabled!(log::Level::Debug) {
        if let Ok(pretty) = serde_json::to_string_pretty(&body) {
            debug!("[Upload] Upload response: {}", pretty);
        }
    }

    Ok(UploadResponse::from(body))
}

/// Resets the phase to Idle when the submission ends or is dropped
struct SubmissionGuard<'a> {
    phase: &'a Mutex<UploadPhase>,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = UploadPhase::Idle;
    }
}
