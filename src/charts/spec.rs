// Renderer-agnostic chart descriptions

use serde::Serialize;
use serde_json::json;

/// X-axis title shared by every metric chart
pub const CHANNEL_AXIS_TITLE: &str = "Channel";
/// Rotation applied to channel labels so long montages stay readable
pub const CHANNEL_TICK_ANGLE: f64 = 45.0;
/// Fixed chart height in pixels
pub const CHART_HEIGHT: usize = 400;
/// Bottom margin in pixels, sized for rotated labels
pub const CHART_BOTTOM_MARGIN: usize = 150;

/// Chart primitive requested from the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
        }
    }
}

/// One per-channel metric, in the order charts are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricDimension {
    MeanAmplitude,
    MuPsd,
    ErdAmplitude,
    EventLatency,
}

impl MetricDimension {
    /// Builder output order
    pub const ALL: [MetricDimension; 4] = [
        MetricDimension::MeanAmplitude,
        MetricDimension::MuPsd,
        MetricDimension::ErdAmplitude,
        MetricDimension::EventLatency,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            MetricDimension::MeanAmplitude => "Mean Amplitude",
            MetricDimension::MuPsd => "Mu Band PSD (8-13 Hz)",
            MetricDimension::ErdAmplitude => "ERD Amplitude",
            MetricDimension::EventLatency => "Event Onset Latency",
        }
    }

    pub fn series_name(&self) -> &'static str {
        match self {
            MetricDimension::MeanAmplitude => "Mean Amplitude (µV)",
            MetricDimension::MuPsd => "Mu PSD (µV²/Hz)",
            MetricDimension::ErdAmplitude => "ERD Amplitude (µV²)",
            MetricDimension::EventLatency => "Event Latency (s)",
        }
    }

    pub fn y_axis_title(&self) -> &'static str {
        match self {
            MetricDimension::MeanAmplitude => "µV",
            MetricDimension::MuPsd => "µV²/Hz",
            MetricDimension::ErdAmplitude => "µV²",
            MetricDimension::EventLatency => "Seconds",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricDimension::MeanAmplitude => "µV",
            MetricDimension::MuPsd => "µV²/Hz",
            MetricDimension::ErdAmplitude => "µV²",
            MetricDimension::EventLatency => "s",
        }
    }
}

/// Data series: one category per channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub kind: ChartKind,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    pub title: String,
    /// Label rotation in degrees, `None` for the renderer default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_angle: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub bottom: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub height: usize,
    pub margin: Margin,
}

/// Complete description of one chart
///
/// Built fresh from a validated payload and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub dimension: MetricDimension,
    pub unit: String,
    pub series: Series,
    pub layout: ChartLayout,
}

impl ChartSpec {
    /// Render as the `{data, layout}` object consumed by plotly-style renderers
    pub fn to_plot_json(&self) -> serde_json::Value {
        let mut x_axis = json!({ "title": self.layout.x_axis.title });
        if let Some(angle) = self.layout.x_axis.tick_angle {
            x_axis["tickangle"] = json!(angle);
        }
        let mut y_axis = json!({ "title": self.layout.y_axis.title });
        if let Some(angle) = self.layout.y_axis.tick_angle {
            y_axis["tickangle"] = json!(angle);
        }

        json!({
            "data": [{
                "x": self.series.x,
                "y": self.series.y,
                "type": self.series.kind.as_str(),
                "name": self.series.name,
            }],
            "layout": {
                "title": self.layout.title,
                "xaxis": x_axis,
                "yaxis": y_axis,
                "height": self.layout.height,
                "margin": { "b": self.layout.margin.bottom },
            }
        })
    }
}
