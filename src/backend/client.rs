//! HTTP client for the KittenTTS server.

use std::time::Duration;

use reqwest::blocking::Response;

use super::Backend;
use super::types::{BackendError, HealthResponse, SynthesisRequest};

/// HTTP-based engine client.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    /// Create a new HTTP engine client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Get the base URL for this engine.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turn a non-2xx response into an error carrying the body text.
    fn check_status(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let body = body.trim();
        if body.is_empty() {
            Err(BackendError::RequestFailed(format!("Status: {status}")))
        } else {
            Err(BackendError::RequestFailed(format!("Status: {status}: {body}")))
        }
    }
}

impl Backend for HttpBackend {
    fn health(&self) -> Result<HealthResponse, BackendError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        Self::check_status(response)?
            .json()
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }

    fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, BackendError> {
        let url = format!("{}/synthesize", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| BackendError::ConnectionFailed(e.to_string()))?;

        let audio = Self::check_status(response)?
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        if audio.is_empty() {
            return Err(BackendError::EngineError(
                "Engine returned no audio".to_string(),
            ));
        }

        Ok(audio)
    }
}
