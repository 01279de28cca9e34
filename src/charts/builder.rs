// ChartSpec builder
//
// Turns a validated payload into exactly four bar charts, one per metric
// dimension. X categories are the channel names in payload order; Y values
// are the matching field of each metrics record, passed through unchanged.

use super::spec::{
    AxisSpec, ChartKind, ChartLayout, ChartSpec, Margin, MetricDimension, Series,
    CHANNEL_AXIS_TITLE, CHANNEL_TICK_ANGLE, CHART_BOTTOM_MARGIN, CHART_HEIGHT,
};
use crate::payload::{ChannelMetrics, MetricsPayload};

/// Number of charts produced for every payload
pub const CHART_COUNT: usize = MetricDimension::ALL.len();

/// Build the chart set for a validated payload
///
/// Pure: the same payload always yields structurally identical specs.
pub fn build(payload: &MetricsPayload) -> [ChartSpec; CHART_COUNT] {
    MetricDimension::ALL.map(|dimension| build_chart(payload, dimension))
}

/// Build the chart for a single dimension
pub fn build_chart(payload: &MetricsPayload, dimension: MetricDimension) -> ChartSpec {
    ChartSpec {
        dimension,
        unit: dimension.unit().to_string(),
        series: Series {
            name: dimension.series_name().to_string(),
            kind: ChartKind::Bar,
            x: payload.channel_names.clone(),
            y: payload
                .metrics
                .iter()
                .map(|record| extract(record, dimension))
                .collect(),
        },
        layout: ChartLayout {
            title: dimension.title().to_string(),
            x_axis: AxisSpec {
                title: CHANNEL_AXIS_TITLE.to_string(),
                tick_angle: Some(CHANNEL_TICK_ANGLE),
            },
            y_axis: AxisSpec {
                title: dimension.y_axis_title().to_string(),
                tick_angle: None,
            },
            height: CHART_HEIGHT,
            margin: Margin {
                bottom: CHART_BOTTOM_MARGIN,
            },
        },
    }
}

/// Field of a metrics record plotted for `dimension`
pub fn extract(record: &ChannelMetrics, dimension: MetricDimension) -> f64 {
    match dimension {
        MetricDimension::MeanAmplitude => record.mean_amplitude,
        MetricDimension::MuPsd => record.mu_psd,
        MetricDimension::ErdAmplitude => record.erd_amplitude,
        MetricDimension::EventLatency => record.event_latency,
    }
}
