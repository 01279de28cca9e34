//! Session log reported by the CLI `--events` flag.
//!
//! Keeps the most recent session events, numbered in publication order,
//! plus a running tally of submission outcomes that survives eviction.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use serde::Serialize;

pub mod events;

pub use events::{RecordedEvent, SessionEvent, ViewOutcome};

/// Events retained by the global session log
pub const SESSION_LOG_CAPACITY: usize = 128;

static SESSION: Lazy<SessionLog> = Lazy::new(|| SessionLog::with_capacity(SESSION_LOG_CAPACITY));

/// The process-wide session log
pub fn session() -> &'static SessionLog {
    &SESSION
}

/// Submission outcomes seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionTally {
    pub started: u64,
    pub succeeded: u64,
    /// Includes submits rejected before reaching the network
    pub failed: u64,
}

/// What `--events` prints
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub events: Vec<RecordedEvent>,
    pub recorded: u64,
    pub evicted: u64,
    pub submissions: SubmissionTally,
}

#[derive(Default)]
struct LogState {
    events: VecDeque<RecordedEvent>,
    next_seq: u64,
    evicted: u64,
    submissions: SubmissionTally,
}

pub struct SessionLog {
    state: Mutex<LogState>,
    capacity: usize,
}

impl SessionLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Mutex::new(LogState::default()),
            capacity,
        }
    }

    pub fn record(&self, event: SessionEvent) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        match event {
            SessionEvent::SubmissionStarted { .. } => state.submissions.started += 1,
            SessionEvent::SubmissionSucceeded { .. } => state.submissions.succeeded += 1,
            SessionEvent::SubmissionFailed { .. } => state.submissions.failed += 1,
            _ => {}
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        if self.capacity == 0 {
            state.evicted += 1;
            return;
        }
        if state.events.len() == self.capacity {
            state.events.pop_front();
            state.evicted += 1;
        }
        state.events.push_back(RecordedEvent {
            seq,
            timestamp_ms: now_timestamp_ms(),
            event,
        });
    }

    pub fn report(&self) -> SessionReport {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        SessionReport {
            events: state.events.iter().cloned().collect(),
            recorded: state.next_seq,
            evicted: state.evicted,
            submissions: state.submissions,
        }
    }
}

fn now_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(name: &str) -> SessionEvent {
        SessionEvent::FileSelected {
            file_name: name.to_string(),
        }
    }

    #[test]
    fn test_events_numbered_in_order() {
        let log = SessionLog::with_capacity(8);
        log.record(selected("a.edf"));
        log.record(SessionEvent::Navigated {
            route: "/visualize".to_string(),
            with_state: true,
        });

        let report = log.report();
        assert_eq!(report.recorded, 2);
        assert_eq!(report.events[0].seq, 0);
        assert_eq!(report.events[0].event, selected("a.edf"));
        assert_eq!(report.events[1].seq, 1);
        assert!(report.events[1].timestamp_ms > 0);
    }

    #[test]
    fn test_oldest_events_evicted_at_capacity() {
        let log = SessionLog::with_capacity(2);
        log.record(selected("a.edf"));
        log.record(selected("b.edf"));
        log.record(selected("c.edf"));

        let report = log.report();
        assert_eq!(report.events.len(), 2);
        assert_eq!(report.evicted, 1);
        assert_eq!(report.events[0].seq, 1);
        assert_eq!(report.events[0].event, selected("b.edf"));
    }

    #[test]
    fn test_tally_survives_eviction() {
        let log = SessionLog::with_capacity(1);
        log.record(SessionEvent::SubmissionStarted {
            file_name: "a.edf".to_string(),
        });
        log.record(SessionEvent::SubmissionFailed {
            code: 1004,
            message: "bad file".to_string(),
        });
        log.record(SessionEvent::SubmissionStarted {
            file_name: "a.edf".to_string(),
        });
        log.record(SessionEvent::SubmissionSucceeded {
            filename: Some("a.edf".to_string()),
            channels: 3,
            elapsed_ms: 12,
        });

        let report = log.report();
        assert_eq!(report.events.len(), 1);
        assert_eq!(
            report.submissions,
            SubmissionTally {
                started: 2,
                succeeded: 1,
                failed: 1,
            }
        );
    }

    #[test]
    fn test_zero_capacity_only_counts() {
        let log = SessionLog::with_capacity(0);
        log.record(selected("a.edf"));
        let report = log.report();
        assert!(report.events.is_empty());
        assert_eq!(report.recorded, 1);
        assert_eq!(report.evicted, 1);
    }

    #[test]
    fn test_report_serializes_flat_events() {
        let log = SessionLog::with_capacity(4);
        log.record(selected("a.edf"));
        let json = serde_json::to_value(log.report()).unwrap();
        assert_eq!(json["events"][0]["seq"], 0);
        assert_eq!(json["events"][0]["type"], "file_selected");
        assert_eq!(json["events"][0]["payload"]["file_name"], "a.edf");
        assert_eq!(json["submissions"]["started"], 0);
    }
}
