// Payload validation - the gate between navigation state and chart building
//
// Presence checks run in a fixed order and stop at the first failure:
// state → filename → metrics → channel_names → shape. A field of the wrong
// type counts as missing, and so does `metrics` when any record lacks one
// of its four numbers. A payload that passes must also have one metrics
// record per channel name. `sampling_rate` is carried through but never
// required.

use super::types::{MetricsPayload, MetricsRecord, UploadResponse};
use crate::error::PayloadError;

/// Result of validating navigation state
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid(MetricsPayload),
    Invalid(PayloadError),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid(_))
    }

    pub fn into_result(self) -> Result<MetricsPayload, PayloadError> {
        match self {
            ValidationOutcome::Valid(payload) => Ok(payload),
            ValidationOutcome::Invalid(err) => Err(err),
        }
    }
}

/// Validate a received payload for rendering
///
/// # Arguments
/// * `state` - Payload carried by navigation, `None` when the view was
///   reached without one
///
/// # Returns
/// `Valid` with an owned, fully populated payload, or `Invalid` with the
/// first reason found.
pub fn validate(state: Option<&UploadResponse>) -> ValidationOutcome {
    match check(state) {
        Ok(payload) => ValidationOutcome::Valid(payload),
        Err(err) => ValidationOutcome::Invalid(err),
    }
}

fn check(state: Option<&UploadResponse>) -> Result<MetricsPayload, PayloadError> {
    let response = state.ok_or(PayloadError::MissingState)?;

    let filename = response
        .filename
        .as_ref()
        .filter(|name| !name.is_empty())
        .ok_or(PayloadError::MissingField { field: "filename" })?;
    let metrics = response
        .metrics
        .as_ref()
        .and_then(|records| {
            records
                .iter()
                .map(MetricsRecord::complete)
                .collect::<Option<Vec<_>>>()
        })
        .ok_or(PayloadError::MissingField { field: "metrics" })?;
    let channel_names = response
        .channel_names
        .as_ref()
        .ok_or(PayloadError::MissingField {
            field: "channel_names",
        })?;
    let shape = response
        .shape
        .as_ref()
        .ok_or(PayloadError::MissingField { field: "shape" })?;

    if channel_names.len() != metrics.len() {
        return Err(PayloadError::ChannelCountMismatch {
            channels: channel_names.len(),
            records: metrics.len(),
        });
    }

    Ok(MetricsPayload {
        filename: filename.clone(),
        shape: shape.clone(),
        sampling_rate: response.sampling_rate,
        channel_names: channel_names.clone(),
        metrics,
    })
}
