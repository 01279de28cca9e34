use serde::de::DeserializeOwned;
use serde_json::Value;

/// Per-channel metrics record computed by the metrics service
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ChannelMetrics {
    /// Mean signal amplitude (µV)
    pub mean_amplitude: f64,
    /// Mean mu-band (8-13 Hz) power spectral density (µV²/Hz)
    pub mu_psd: f64,
    /// Event-related desynchronization amplitude (µV²)
    pub erd_amplitude: f64,
    /// Onset of the first event annotation (s)
    pub event_latency: f64,
}

/// A metrics record as received; any field may be missing or non-numeric
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct MetricsRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_amplitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mu_psd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub erd_amplitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_latency: Option<f64>,
}

impl MetricsRecord {
    fn from_value(value: &Value) -> Self {
        let number = |name: &str| value.get(name).and_then(Value::as_f64);
        Self {
            mean_amplitude: number("mean_amplitude"),
            mu_psd: number("mu_psd"),
            erd_amplitude: number("erd_amplitude"),
            event_latency: number("event_latency"),
        }
    }

    /// All four metrics, or `None` if any is absent
    pub fn complete(&self) -> Option<ChannelMetrics> {
        Some(ChannelMetrics {
            mean_amplitude: self.mean_amplitude?,
            mu_psd: self.mu_psd?,
            erd_amplitude: self.erd_amplitude?,
            event_latency: self.event_latency?,
        })
    }
}

impl From<ChannelMetrics> for MetricsRecord {
    fn from(metrics: ChannelMetrics) -> Self {
        Self {
            mean_amplitude: Some(metrics.mean_amplitude),
            mu_psd: Some(metrics.mu_psd),
            erd_amplitude: Some(metrics.erd_amplitude),
            event_latency: Some(metrics.event_latency),
        }
    }
}

/// Success body of the upload endpoint, as received
///
/// Any JSON document converts: fields that are absent or of the wrong type
/// are `None`, and a non-object body yields an empty response. Presence and
/// completeness are checked later by [`crate::payload::validate`].
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct UploadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub filename: Option<String>,
    pub shape: Option<Vec<u64>>,
    pub sampling_rate: Option<f64>,
    pub channel_names: Option<Vec<String>>,
    pub metrics: Option<Vec<MetricsRecord>>,
}

impl From<Value> for UploadResponse {
    fn from(value: Value) -> Self {
        let field = |name: &str| value.get(name);
        Self {
            message: field("message").and_then(Value::as_str).map(str::to_string),
            filename: field("filename").and_then(Value::as_str).map(str::to_string),
            shape: typed(field("shape")),
            sampling_rate: field("sampling_rate").and_then(Value::as_f64),
            channel_names: typed(field("channel_names")),
            metrics: field("metrics")
                .and_then(Value::as_array)
                .map(|records| records.iter().map(MetricsRecord::from_value).collect()),
        }
    }
}

fn typed<T: DeserializeOwned>(value: Option<&Value>) -> Option<T> {
    value.and_then(|value| T::deserialize(value).ok())
}

/// Failure body of the upload endpoint
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub error: Option<String>,
}

/// A payload that passed validation and can be charted
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MetricsPayload {
    pub filename: String,
    /// Raw recording dimensions, channels × samples
    pub shape: Vec<u64>,
    pub sampling_rate: Option<f64>,
    /// X-axis category order for every chart
    pub channel_names: Vec<String>,
    /// Positionally aligned with `channel_names`
    pub metrics: Vec<ChannelMetrics>,
}

impl MetricsPayload {
    pub fn channel_count(&self) -> usize {
        self.channel_names.len()
    }

    /// `(name, record)` pairs in channel order
    pub fn channels(&self) -> impl Iterator<Item = (&str, &ChannelMetrics)> {
        self.channel_names
            .iter()
            .map(String::as_str)
            .zip(self.metrics.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_tolerates_missing_and_extra_fields() {
        let parsed: UploadResponse = serde_json::from_str(
            r#"{"message": "File uploaded successfully", "filename": "a.edf", "chaos": {"x": 1}}"#,
        )
        .unwrap();
        assert_eq!(parsed.filename.as_deref(), Some("a.edf"));
        assert_eq!(parsed.message.as_deref(), Some("File uploaded successfully"));
        assert!(parsed.metrics.is_none());
        assert!(parsed.sampling_rate.is_none());
    }

    #[test]
    fn test_wrongly_typed_fields_read_as_absent() {
        let parsed: UploadResponse = serde_json::from_str(
            r#"{"filename": 7, "shape": "3x1000", "channel_names": "C3", "sampling_rate": "fast"}"#,
        )
        .unwrap();
        assert_eq!(parsed, UploadResponse::default());

        let parsed: UploadResponse =
            serde_json::from_str(r#"{"channel_names": ["C3", 4]}"#).unwrap();
        assert!(parsed.channel_names.is_none());
    }

    #[test]
    fn test_non_object_body_is_empty_response() {
        for body in ["null", "[1, 2]", "\"ok\"", "42"] {
            let parsed: UploadResponse = serde_json::from_str(body).unwrap();
            assert_eq!(parsed, UploadResponse::default(), "body {body}");
        }
    }

    #[test]
    fn test_incomplete_record_is_kept() {
        let parsed: UploadResponse = serde_json::from_str(
            r#"{"metrics": [{"mean_amplitude": 1, "mu_psd": 2, "erd_amplitude": 3}, "junk"]}"#,
        )
        .unwrap();
        let records = parsed.metrics.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].mean_amplitude, Some(1.0));
        assert_eq!(records[0].event_latency, None);
        assert!(records[0].complete().is_none());
        assert_eq!(records[1], MetricsRecord::default());
    }

    #[test]
    fn test_serialized_response_reads_back() {
        let response = UploadResponse {
            filename: Some("a.edf".to_string()),
            shape: Some(vec![1, 10]),
            metrics: Some(vec![MetricsRecord {
                mu_psd: Some(2.5),
                ..MetricsRecord::default()
            }]),
            ..UploadResponse::default()
        };
        let json = serde_json::to_string(&response).unwrap();
        let parsed: UploadResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, response);
    }

    #[test]
    fn test_error_body() {
        let parsed: ErrorBody = serde_json::from_str(r#"{"error": "bad file"}"#).unwrap();
        assert_eq!(parsed.error.as_deref(), Some("bad file"));

        let parsed: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(parsed.error.is_none());
    }
}
