//! Chart specifications derived from validated metrics payloads.

mod builder;
mod spec;

pub use builder::{build, build_chart, extract, CHART_COUNT};
pub use spec::{
    AxisSpec, ChartKind, ChartLayout, ChartSpec, Margin, MetricDimension, Series,
    CHANNEL_AXIS_TITLE, CHANNEL_TICK_ANGLE, CHART_BOTTOM_MARGIN, CHART_HEIGHT,
};
