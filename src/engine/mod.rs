//! TTS Engine orchestrator.
//!
//! This module sits between the session and the [`Backend`](crate::backend::Backend):
//! it runs engine calls so they can be interrupted, and writes the audio
//! they return to disk.

mod output;
mod tts;

pub use output::{AudioStats, OutputFile, save_audio};
pub use tts::{SynthesisError, TTSEngine};


#[cfg(test)]
mod tests {
    use super::test_audio::silent_wav;
    use super::*;
    use crate::backend::{BackendError, HealthResponse, MockBackend, SynthesisRequest};
    use crate::interrupt::Interrupt;
    use crate::voice::VoicePreset;
    use std::time::Duration;
    use tempfile::TempDir;

    fn hello_request() -> SynthesisRequest {
        SynthesisRequest::new("Hello world", VoicePreset::Voice2Female, 1.0)
    }

    #[test]
    fn test_engine_health_check_success() {
        let mut mock_backend = MockBackend::new();

        mock_backend.expect_health().times(1).returning(|| {
            Ok(HealthResponse {
                status: "healthy".to_string(),
                model: "KittenML/kitten-tts-nano-0.1".to_string(),
                voices: vec![],
            })
        });

        let engine = TTSEngine::new(mock_backend).unwrap();
        let health = engine.health_check(&Interrupt::new()).unwrap();

        assert_eq!(health.model, "KittenML/kitten-tts-nano-0.1");
    }

    #[test]
    fn test_engine_health_check_failure() {
        let mut mock_backend = MockBackend::new();

        mock_backend.expect_health().times(1).returning(|| {
            Err(BackendError::ConnectionFailed(
                "Connection refused".to_string(),
            ))
        });

        let engine = TTSEngine::new(mock_backend).unwrap();
        assert!(engine.health_check(&Interrupt::new()).is_err());
    }

    #[test]
    fn test_engine_health_check_interrupted_while_engine_hangs() {
        let mut mock_backend = MockBackend::new();
        let interrupt = Interrupt::new();
        let trigger = interrupt.clone();

        mock_backend.expect_health().returning(move || {
            trigger.trigger();
            std::thread::sleep(Duration::from_secs(2));
            Err(BackendError::ConnectionFailed("timed out".to_string()))
        });

        let engine = TTSEngine::new(mock_backend).unwrap();
        let started = std::time::Instant::now();
        let result = engine.health_check(&interrupt);

        assert!(result.unwrap_err().is_interrupt());
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_engine_synthesize_passes_request_through() {
        let mut mock_backend = MockBackend::new();

        mock_backend
            .expect_synthesize()
            .withf(|req| {
                req.text == "Hello world"
                    && req.voice == VoicePreset::Voice2Female
                    && req.speed == 1.0
            })
            .times(1)
            .returning(|_| Ok(b"RIFF wav audio data".to_vec()));

        let engine = TTSEngine::new(mock_backend).unwrap();
        let audio = engine.synthesize(&hello_request(), &Interrupt::new()).unwrap();

        assert_eq!(audio, b"RIFF wav audio data");
    }

    #[test]
    fn test_engine_synthesize_backend_error() {
        let mut mock_backend = MockBackend::new();

        mock_backend
            .expect_synthesize()
            .times(1)
            .returning(|_| Err(BackendError::EngineError("model crashed".to_string())));

        let engine = TTSEngine::new(mock_backend).unwrap();
        let result = engine.synthesize(&hello_request(), &Interrupt::new());

        assert!(matches!(result.unwrap_err(), SynthesisError::Backend(_)));
    }

    #[test]
    fn test_engine_synthesize_skipped_when_already_interrupted() {
        let mock_backend = MockBackend::new();
        let interrupt = Interrupt::new();
        interrupt.trigger();

        let engine = TTSEngine::new(mock_backend).unwrap();
        let result = engine.synthesize(&hello_request(), &interrupt);

        assert!(result.unwrap_err().is_interrupt());
    }

    #[test]
    fn test_engine_synthesize_interrupted_mid_call() {
        let mut mock_backend = MockBackend::new();
        let interrupt = Interrupt::new();
        let trigger = interrupt.clone();

        mock_backend.expect_synthesize().returning(move |_| {
            trigger.trigger();
            std::thread::sleep(Duration::from_millis(500));
            Ok(b"late audio".to_vec())
        });

        let engine = TTSEngine::new(mock_backend).unwrap();
        let result = engine.synthesize(&hello_request(), &interrupt);

        assert!(result.unwrap_err().is_interrupt());
    }

    #[test]
    fn test_engine_synthesize_and_save_writes_exact_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("generated_audio").join("hello.wav");
        let mut mock_backend = MockBackend::new();

        mock_backend
            .expect_synthesize()
            .times(1)
            .returning(|_| Ok(vec![0xde, 0xad, 0xbe, 0xef]));

        let engine = TTSEngine::new(mock_backend).unwrap();
        let output = engine
            .synthesize_and_save(&hello_request(), &path, &Interrupt::new())
            .unwrap();

        assert_eq!(output.path, path);
        assert_eq!(output.size_bytes, 4);
        assert!(output.audio.is_none());
        assert_eq!(std::fs::read(&path).unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_engine_failure_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("generated_audio");
        let path = out_dir.join("hello.wav");
        let mut mock_backend = MockBackend::new();

        mock_backend
            .expect_synthesize()
            .times(1)
            .returning(|_| Err(BackendError::RequestFailed("Status: 500".to_string())));

        let engine = TTSEngine::new(mock_backend).unwrap();
        let result = engine.synthesize_and_save(&hello_request(), &path, &Interrupt::new());

        assert!(result.is_err());
        assert!(!path.exists());
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_save_reports_wav_stats() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stats.wav");
        let wav = silent_wav(24_000, 12_000);

        let output = save_audio(&wav, &path).unwrap();

        let stats = output.audio.unwrap();
        assert_eq!(stats.sample_rate, 24_000);
        assert_eq!(stats.channels, 1);
        assert!((stats.duration_secs - 0.5).abs() < 1e-6);
        assert_eq!(output.size_bytes, wav.len() as u64);
    }

    #[test]
    fn test_save_into_file_path_fails_with_persistence_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"plain file").unwrap();

        let result = save_audio(b"audio", &blocker.join("out.wav"));

        assert!(matches!(
            result.unwrap_err(),
            SynthesisError::Persistence { .. }
        ));
    }

    #[test]
    fn test_inspect_rejects_non_wav() {
        assert!(AudioStats::inspect(b"not a wav file").is_none());
        assert!(AudioStats::inspect(&[]).is_none());
    }
}
