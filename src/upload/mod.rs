//! Upload orchestration: file selection, the transport seam to the metrics
//! service, and the single in-flight submission.

mod file;
mod orchestrator;
mod transport;

pub use file::{RecordingFile, UploadRequest};
pub use orchestrator::{interpret_response, UploadOrchestrator, UploadPhase};
pub use transport::{HttpTransport, MetricsTransport, TransportResponse};
