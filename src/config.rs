//! Session configuration, built once at startup.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::cli::Args;
use crate::voice::VoicePreset;

/// Slowest speed multiplier the engine is asked for.
pub const MIN_SPEED: f64 = 0.5;
/// Fastest speed multiplier the engine is asked for.
pub const MAX_SPEED: f64 = 2.0;
/// Speed used when the user leaves the prompt blank.
pub const DEFAULT_SPEED: f64 = 1.0;
/// Prefix of generated file names.
pub const DEFAULT_FILE_STEM: &str = "kitten_tts";
/// Extension of saved audio files.
pub const AUDIO_EXTENSION: &str = "wav";

const APP_DIR: &str = "kitten-tts-rs";

/// Immutable settings shared by every generation in a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub output_dir: PathBuf,
    pub file_stem: String,
    pub extension: String,
    pub default_voice: VoicePreset,
    pub default_speed: f64,
    pub speed_range: RangeInclusive<f64>,
}

impl SessionConfig {
    /// Create a configuration that saves audio under `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            extension: AUDIO_EXTENSION.to_string(),
            default_voice: VoicePreset::default(),
            default_speed: DEFAULT_SPEED,
            speed_range: MIN_SPEED..=MAX_SPEED,
        }
    }

    /// Build the configuration from command line arguments.
    pub fn from_args(args: &Args) -> Self {
        Self::new(args.output_dir.clone())
    }
}

/// Per-user directory for logs and prompt history.
pub fn app_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_config_defaults() {
        let config = SessionConfig::new("generated_audio");

        assert_eq!(config.output_dir, PathBuf::from("generated_audio"));
        assert_eq!(config.file_stem, "kitten_tts");
        assert_eq!(config.extension, "wav");
        assert_eq!(config.default_voice, VoicePreset::Voice2Female);
        assert_eq!(config.default_speed, 1.0);
        assert_eq!(config.speed_range, 0.5..=2.0);
    }

    #[test]
    fn test_config_from_args() {
        let args = Args::parse_from(["kitten-tts-rs", "--output-dir", "speech"]);
        let config = SessionConfig::from_args(&args);
        assert_eq!(config.output_dir, PathBuf::from("speech"));
    }

    #[test]
    fn test_app_data_dir_is_namespaced() {
        assert!(app_data_dir().ends_with("kitten-tts-rs"));
    }
}
