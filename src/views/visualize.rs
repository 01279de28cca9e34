// Visualization view - consumes navigation state and renders the chart grid
//
// States: Loading (before the first evaluation), Error(reason), Ready(charts).
// The view re-evaluates whenever the navigation state identity changes and
// discards previous charts. It never returns to Loading.

use log::{debug, info};

use super::{RecordingSummary, Screen, ScreenBody};
use crate::charts::{self, ChartSpec};
use crate::error::{log_payload_error, ErrorCode, PayloadError};
use crate::navigation::{NavigationState, Route};
use crate::payload::{validate, MetricsPayload, ValidationOutcome};
use crate::telemetry::{self, SessionEvent, ViewOutcome};

pub const VISUALIZE_HEADING_PREFIX: &str = "EEG Data Visualization";
pub const LOADING_TEXT: &str = "Loading data...";
pub const UNKNOWN_FILENAME: &str = "Unknown";

/// Render state of the visualization view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    Error(PayloadError),
    Ready {
        payload: MetricsPayload,
        charts: Vec<ChartSpec>,
    },
}

/// Visualization view bound to the navigation state it last evaluated
#[derive(Debug, Clone)]
pub struct VisualizationView {
    state: ViewState,
    /// `None` until the first evaluation, then the state that was evaluated
    evaluated: Option<Option<NavigationState>>,
    heading_filename: Option<String>,
    columns: usize,
}

impl VisualizationView {
    pub fn new(columns: usize) -> Self {
        Self {
            state: ViewState::Loading,
            evaluated: None,
            heading_filename: None,
            columns: columns.max(1),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Feed the current navigation state
    ///
    /// Runs validation and chart building on the first call and whenever
    /// `state` is a different transition than the last one evaluated.
    ///
    /// # Returns
    /// `true` when the view re-evaluated.
    pub fn observe(&mut self, state: Option<&NavigationState>) -> bool {
        if let Some(previous) = &self.evaluated {
            let unchanged = match (previous, state) {
                (None, None) => true,
                (Some(previous), Some(current)) => previous.same_as(current),
                _ => false,
            };
            if unchanged {
                return false;
            }
        }

        self.evaluate(state);
        self.evaluated = Some(state.cloned());
        true
    }

    fn evaluate(&mut self, state: Option<&NavigationState>) {
        let response = state.map(NavigationState::response);
        self.heading_filename = response
            .and_then(|r| r.filename.clone())
            .filter(|name| !name.is_empty());

        match validate(response) {
            ValidationOutcome::Invalid(err) => {
                log_payload_error(&err, "visualize");
                telemetry::session().record(SessionEvent::ViewEvaluated {
                    outcome: ViewOutcome::Error,
                    code: Some(err.code()),
                });
                self.state = ViewState::Error(err);
            }
            ValidationOutcome::Valid(payload) => {
                let charts = charts::build(&payload).to_vec();
                info!(
                    "[Visualize] {} ready: {} channels, {} charts",
                    payload.filename,
                    payload.channel_count(),
                    charts.len()
                );
                debug!("[Visualize] shape={:?}", payload.shape);
                telemetry::session().record(SessionEvent::ViewEvaluated {
                    outcome: ViewOutcome::Ready,
                    code: None,
                });
                self.state = ViewState::Ready { payload, charts };
            }
        }
    }

    pub fn heading(&self) -> String {
        format!(
            "{}: {}",
            VISUALIZE_HEADING_PREFIX,
            self.heading_filename.as_deref().unwrap_or(UNKNOWN_FILENAME)
        )
    }

    pub fn render(&self) -> Screen {
        let body = match &self.state {
            ViewState::Loading => ScreenBody::Loading {
                text: LOADING_TEXT.to_string(),
            },
            ViewState::Error(err) => ScreenBody::Error {
                text: err.message(),
            },
            ViewState::Ready { payload, charts } => ScreenBody::ChartGrid {
                columns: self.columns,
                summary: RecordingSummary {
                    filename: payload.filename.clone(),
                    shape: payload.shape.clone(),
                    sampling_rate: payload.sampling_rate,
                    channels: payload.channel_count(),
                },
                charts: charts.clone(),
            },
        };
        Screen::new(Route::Visualize, self.heading(), body)
    }
}
