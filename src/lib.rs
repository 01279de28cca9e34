// NeuroChaos Viewer Core - EEG upload and metric visualization
// Uploads a recording to the metrics service and renders per-channel charts

// Module declarations
pub mod charts;
pub mod config;
pub mod context;
pub mod error;
pub mod navigation;
pub mod payload;
pub mod render;
pub mod telemetry;
pub mod upload;
pub mod views;

// Re-exports for convenience
pub use config::AppConfig;
pub use context::AppContext;
pub use error::{ErrorCode, PayloadError, UploadError};
pub use navigation::{NavigationShell, NavigationState, Route};
pub use payload::{MetricsPayload, UploadResponse};
pub use upload::RecordingFile;
pub use views::Screen;
