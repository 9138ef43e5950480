//! Engine request/response types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::voice::VoicePreset;

/// Errors that can occur when communicating with the engine.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Engine error: {0}")]
    EngineError(String),
}

/// Health check response from the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    /// Voice identifiers the loaded model accepts.
    #[serde(default)]
    pub voices: Vec<String>,
}

impl HealthResponse {
    /// Returns the catalog presets the engine did not advertise.
    ///
    /// An engine that reports no voices at all is assumed to accept the
    /// whole catalog.
    pub fn missing_presets(&self) -> Vec<VoicePreset> {
        if self.voices.is_empty() {
            return Vec::new();
        }

        VoicePreset::ALL
            .iter()
            .filter(|preset| !self.voices.iter().any(|v| v == preset.id()))
            .copied()
            .collect()
    }
}

/// One validated generation: what to say, with which voice, how fast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: VoicePreset,
    #[serde(default = "default_speed")]
    pub speed: f64,
}

fn default_speed() -> f64 {
    1.0
}

impl SynthesisRequest {
    /// Create a new synthesis request.
    pub fn new(text: impl Into<String>, voice: VoicePreset, speed: f64) -> Self {
        Self {
            text: text.into(),
            voice,
            speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesis_request_serialize() {
        let request = SynthesisRequest::new("Hello world", VoicePreset::Voice2Female, 1.5);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["text"], "Hello world");
        assert_eq!(json["voice"], "expr-voice-2-f");
        assert_eq!(json["speed"], 1.5);
    }

    #[test]
    fn test_synthesis_request_default_speed() {
        let json = r#"{"text": "Hi", "voice": "expr-voice-5-m"}"#;
        let request: SynthesisRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.voice, VoicePreset::Voice5Male);
        assert_eq!(request.speed, 1.0);
    }

    #[test]
    fn test_health_response_deserialize() {
        let json = r#"{
            "status": "healthy",
            "model": "KittenML/kitten-tts-nano-0.1",
            "voices": ["expr-voice-2-m", "expr-voice-2-f"]
        }"#;

        let response: HealthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "healthy");
        assert_eq!(response.voices.len(), 2);
    }

    #[test]
    fn test_health_response_without_voices() {
        let json = r#"{"status": "healthy", "model": "kitten"}"#;

        let response: HealthResponse = serde_json::from_str(json).unwrap();
        assert!(response.voices.is_empty());
        assert!(response.missing_presets().is_empty());
    }

    #[test]
    fn test_health_response_missing_presets() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            model: "kitten".to_string(),
            voices: VoicePreset::ALL
                .iter()
                .filter(|v| **v != VoicePreset::Voice4Female)
                .map(|v| v.id().to_string())
                .collect(),
        };

        assert_eq!(response.missing_presets(), vec![VoicePreset::Voice4Female]);
    }
}
