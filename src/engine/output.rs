//! Saved audio artifacts.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::debug;

use super::SynthesisError;

/// Format details read from a WAV header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioStats {
    pub sample_rate: u32,
    pub channels: u16,
    pub duration_secs: f32,
}

impl AudioStats {
    /// Read the header of an in-memory WAV file.
    ///
    /// Returns `None` when the bytes are not a WAV hound can parse.
    pub fn inspect(audio: &[u8]) -> Option<Self> {
        let reader = match hound::WavReader::new(Cursor::new(audio)) {
            Ok(reader) => reader,
            Err(e) => {
                debug!("Audio is not a readable WAV: {e}");
                return None;
            }
        };

        let spec = reader.spec();
        if spec.sample_rate == 0 {
            return None;
        }

        Some(Self {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            duration_secs: reader.duration() as f32 / spec.sample_rate as f32,
        })
    }
}

/// A generated audio file on disk. Never modified after creation.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub path: PathBuf,
    pub created_at: DateTime<Local>,
    pub size_bytes: u64,
    pub audio: Option<AudioStats>,
}

/// Write audio bytes to `path`, creating the parent directory first.
pub fn save_audio(audio: &[u8], path: &Path) -> Result<OutputFile, SynthesisError> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).map_err(|source| SynthesisError::Persistence {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, audio).map_err(|source| SynthesisError::Persistence {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(OutputFile {
        path: path.to_path_buf(),
        created_at: Local::now(),
        size_bytes: audio.len() as u64,
        audio: AudioStats::inspect(audio),
    })
}
