//! Views and the renderer-neutral [`Screen`] they produce.
//!
//! Views never draw anything themselves; `render::text` and `render::html`
//! turn a `Screen` into terminal output or an HTML page.

pub mod landing;
pub mod upload;
pub mod visualize;

use crate::charts::ChartSpec;
use crate::navigation::Route;

pub use upload::UploadView;
pub use visualize::{ViewState, VisualizationView};

/// Entry in the navigation bar
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// Navigation bar for the given current route
pub fn nav_links(current: Route) -> Vec<NavLink> {
    Route::ALL
        .into_iter()
        .map(|route| NavLink {
            label: route.label(),
            path: route.path(),
            active: route == current,
        })
        .collect()
}

/// Feedback line under the upload form
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "level", content = "text", rename_all = "snake_case")]
pub enum StatusLine {
    Info(String),
    Error(String),
}

/// Recording facts shown above the chart grid
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RecordingSummary {
    pub filename: String,
    pub shape: Vec<u64>,
    pub sampling_rate: Option<f64>,
    pub channels: usize,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScreenBody {
    Text {
        text: String,
    },
    UploadForm {
        accept: String,
        selected: Option<String>,
        submitting: bool,
        status: Option<StatusLine>,
    },
    Loading {
        text: String,
    },
    Error {
        text: String,
    },
    ChartGrid {
        columns: usize,
        summary: RecordingSummary,
        charts: Vec<ChartSpec>,
    },
}

/// Everything a renderer needs for one view
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Screen {
    pub route: Route,
    pub nav: Vec<NavLink>,
    pub heading: String,
    pub body: ScreenBody,
}

impl Screen {
    pub fn new(route: Route, heading: impl Into<String>, body: ScreenBody) -> Self {
        Self {
            route,
            nav: nav_links(route),
            heading: heading.into(),
            body,
        }
    }

    /// Charts on screen, empty unless the body is a chart grid
    pub fn charts(&self) -> &[ChartSpec] {
        match &self.body {
            ScreenBody::ChartGrid { charts, .. } => charts.as_slice(),
            _ => &[],
        }
    }

    /// Error text on screen, if any
    pub fn error_text(&self) -> Option<&str> {
        match &self.body {
            ScreenBody::Error { text } => Some(text.as_str()),
            ScreenBody::UploadForm {
                status: Some(StatusLine::Error(text)),
                ..
            } => Some(text.as_str()),
            _ => None,
        }
    }
}
