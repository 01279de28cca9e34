//! Configuration management for the upload pipeline and renderers
//!
//! Configuration is loaded from a JSON file so the metrics endpoint,
//! upload timeout and chart grid can be adjusted without recompilation.
//! Missing sections and fields fall back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "neurochaos.json";

/// Environment variable overriding the upload endpoint
pub const ENV_UPLOAD_ENDPOINT: &str = "NEUROCHAOS_UPLOAD_ENDPOINT";

/// Environment variable overriding the upload timeout (seconds)
pub const ENV_UPLOAD_TIMEOUT_SECS: &str = "NEUROCHAOS_UPLOAD_TIMEOUT_SECS";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub upload: UploadConfig,
    pub render: RenderConfig,
}

/// Upload submission parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Metrics service endpoint receiving the multipart form
    pub endpoint: String,
    /// Multipart field carrying the recording
    pub field_name: String,
    /// Extension advertised by the file picker (hint only)
    pub accept_extension: String,
    /// Upper bound on a single submission, in seconds
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/upload".to_string(),
            field_name: "file".to_string(),
            accept_extension: ".edf".to_string(),
            timeout_secs: 120,
        }
    }
}

impl UploadConfig {
    /// Submission timeout; never zero so an upload cannot wait forever
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Chart grid and HTML output parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Number of chart columns in the visualization grid
    pub grid_columns: usize,
    /// Gap between grid cells in pixels
    pub grid_gap_px: u32,
    /// plotly.js bundle referenced by generated HTML pages
    pub plotly_js_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            grid_columns: 2,
            grid_gap_px: 20,
            plotly_js_url: "https://cdn.plot.ly/plotly-2.35.2.min.js".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or defaults if the file doesn't exist or
    /// the JSON is invalid.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load `neurochaos.json` from the working directory, then apply
    /// environment overrides
    pub fn load() -> Self {
        let mut config = if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::load_from_file(DEFAULT_CONFIG_FILE)
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        config
    }

    /// Apply `NEUROCHAOS_*` environment overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_UPLOAD_ENDPOINT).ok(),
            std::env::var(ENV_UPLOAD_TIMEOUT_SECS).ok(),
        );
    }

    fn apply_overrides(&mut self, endpoint: Option<String>, timeout_secs: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|value| !value.trim().is_empty()) {
            log::info!("[Config] Upload endpoint overridden: {}", endpoint);
            self.upload.endpoint = endpoint;
        }

        if let Some(raw) = timeout_secs {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.upload.timeout_secs = secs,
                Err(err) => log::warn!(
                    "[Config] Ignoring {}={:?}: {}",
                    ENV_UPLOAD_TIMEOUT_SECS,
                    raw,
                    err
                ),
            }
        }
    }
}
