//! Session event types describing what happened during one viewer session:
//! file selection, submissions, navigations and view evaluations.

use serde::Serialize;

/// Result of a visualization view evaluation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewOutcome {
    Ready,
    Error,
}

/// Session events published by the orchestrator, shell and views.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SessionEvent {
    FileSelected {
        file_name: String,
    },
    SubmissionStarted {
        file_name: String,
    },
    SubmissionFailed {
        code: i32,
        message: String,
    },
    SubmissionSucceeded {
        filename: Option<String>,
        channels: usize,
        elapsed_ms: u64,
    },
    Navigated {
        route: String,
        with_state: bool,
    },
    ViewEvaluated {
        outcome: ViewOutcome,
        code: Option<i32>,
    },
}

/// Event with its position in the session and the wall-clock time it was
/// recorded.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordedEvent {
    pub seq: u64,
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub event: SessionEvent,
}
