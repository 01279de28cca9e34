// Transport seam between the orchestrator and the metrics service

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::file::UploadRequest;
use crate::config::UploadConfig;
use crate::error::UploadError;

/// Raw response from the metrics service
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one upload request and returns the raw response
///
/// Implementations report network failures as
/// [`UploadError::TransportFailure`]; status handling is left to the caller.
#[async_trait]
pub trait MetricsTransport: Send + Sync {
    async fn send(&self, request: UploadRequest) -> Result<TransportResponse, UploadError>;
}

/// Multipart POST to the configured upload endpoint
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(config: &UploadConfig) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| UploadError::TransportFailure {
                reason: err.to_string(),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MetricsTransport for HttpTransport {
    async fn send(&self, request: UploadRequest) -> Result<TransportResponse, UploadError> {
        let part = Part::bytes(request.bytes)
            .file_name(request.file_name)
            .mime_str("application/octet-stream")
            .map_err(transport_failure)?;
        let form = Form::new().part(request.field_name, part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(transport_failure)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_failure)?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn transport_failure(err: reqwest::Error) -> UploadError {
    UploadError::TransportFailure {
        reason: err.to_string(),
    }
}
