//! Metrics payload contract and validation.
//!
//! [`UploadResponse`] is what the metrics service sends back; it travels
//! through navigation untouched. [`validate`] turns it into a
//! [`MetricsPayload`] that the chart builder can rely on.

mod types;
mod validation;

pub use types::{ChannelMetrics, ErrorBody, MetricsPayload, MetricsRecord, UploadResponse};
pub use validation::{validate, ValidationOutcome};
