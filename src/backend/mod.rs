//! Communication with the external KittenTTS engine.
//!
//! The engine is a black box that turns text, a voice and a speed into
//! WAV audio. [`Backend`] is the seam; [`HttpBackend`] talks to a
//! KittenTTS server over HTTP.

mod client;
mod types;

use std::time::Duration;

pub use client::HttpBackend;
pub use types::{BackendError, HealthResponse, SynthesisRequest};

use crate::cli::Args;

/// Trait for TTS engine communication.
///
/// This trait abstracts the HTTP communication with the engine,
/// allowing for mock implementations in tests.
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send + Sync {
    /// Check engine health and the voices it accepts.
    fn health(&self) -> Result<HealthResponse, BackendError>;

    /// Synthesize speech from text.
    ///
    /// # Arguments
    /// * `request` - Validated synthesis parameters
    ///
    /// # Returns
    /// Raw WAV audio data
    fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, BackendError>;
}

/// Create an engine client from the command line arguments.
pub fn create_backend(args: &Args) -> Result<HttpBackend, BackendError> {
    HttpBackend::new(args.engine_url(), Duration::from_secs(args.timeout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::VoicePreset;
    use clap::Parser;

    #[test]
    fn test_mock_backend_health_success() {
        let mut mock = MockBackend::new();

        mock.expect_health().times(1).returning(|| {
            Ok(HealthResponse {
                status: "healthy".to_string(),
                model: "KittenML/kitten-tts-nano-0.1".to_string(),
                voices: vec!["expr-voice-2-f".to_string()],
            })
        });

        let health = mock.health().unwrap();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_mock_backend_health_failure() {
        let mut mock = MockBackend::new();

        mock.expect_health().times(1).returning(|| {
            Err(BackendError::ConnectionFailed(
                "Connection refused".to_string(),
            ))
        });

        let result = mock.health();
        assert!(matches!(
            result.unwrap_err(),
            BackendError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_mock_backend_synthesize() {
        let mut mock = MockBackend::new();

        mock.expect_synthesize()
            .withf(|req| {
                req.text == "Hello world" && req.voice == VoicePreset::Voice2Female
            })
            .times(1)
            .returning(|_| Ok(b"RIFF\x00\x00\x00\x00WAVEfmt ".to_vec()));

        let request = SynthesisRequest::new("Hello world", VoicePreset::Voice2Female, 1.0);

        let audio = mock.synthesize(&request).unwrap();
        assert!(audio.starts_with(b"RIFF"));
    }

    #[test]
    fn test_create_backend_default_url() {
        let args = Args::parse_from(["kitten-tts-rs"]);
        let backend = create_backend(&args).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8300");
    }

    #[test]
    fn test_http_backend_trims_trailing_slash() {
        let backend = HttpBackend::new("http://engine:1234/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.base_url(), "http://engine:1234");
    }

    #[test]
    fn test_http_backend_unreachable_engine() {
        // Port 9 (discard) is closed on test machines.
        let backend = HttpBackend::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        assert!(backend.health().is_err());
    }
}
