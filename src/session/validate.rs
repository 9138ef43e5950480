//! Validation of the values typed at each prompt.

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, TimeZone};
use thiserror::Error;

use crate::config::SessionConfig;
use crate::voice::VoicePreset;

/// A rejected answer. The session shows the message and asks again.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("No text entered. Please try again.")]
    EmptyText,

    #[error("Unknown voice '{0}'. Enter a number between 1 and 8 or a voice name.")]
    UnknownVoice(String),

    #[error("'{0}' is not a valid number.")]
    InvalidNumber(String),

    #[error("Speed must be between {min:.1} and {max:.1}.")]
    SpeedOutOfRange { value: f64, min: f64, max: f64 },

    #[error("Invalid file name '{0}': use a plain name without directories.")]
    InvalidFileName(String),
}

/// Accept text that contains something other than whitespace.
pub fn validate_text(input: &str) -> Result<String, InputError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(InputError::EmptyText);
    }
    Ok(text.to_string())
}

/// Map a catalog index or identifier to a voice; blank selects the default.
pub fn parse_voice(input: &str, config: &SessionConfig) -> Result<VoicePreset, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(config.default_voice);
    }

    trimmed
        .parse()
        .map_err(|_| InputError::UnknownVoice(trimmed.to_string()))
}

/// Parse a speed multiplier within the configured range; blank selects the default.
pub fn parse_speed(input: &str, config: &SessionConfig) -> Result<f64, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(config.default_speed);
    }

    let speed: f64 = trimmed
        .parse()
        .map_err(|_| InputError::InvalidNumber(trimmed.to_string()))?;

    if !speed.is_finite() || !config.speed_range.contains(&speed) {
        return Err(InputError::SpeedOutOfRange {
            value: speed,
            min: *config.speed_range.start(),
            max: *config.speed_range.end(),
        });
    }

    Ok(speed)
}

/// `<stem>_<YYYYMMDD_HHMMSS>.<ext>`.
///
/// Two names generated within the same second are identical.
pub fn default_file_name<Tz>(stem: &str, extension: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("{stem}_{}.{extension}", now.format("%Y%m%d_%H%M%S"))
}

/// Resolve the answer to the file name prompt to a path in the output directory.
///
/// Blank input yields a timestamped default name. Custom names are kept
/// verbatim, with the configured extension appended when missing.
pub fn resolve_output_path<Tz>(
    input: &str,
    stem: &str,
    config: &SessionConfig,
    now: &DateTime<Tz>,
) -> Result<PathBuf, InputError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(config
            .output_dir
            .join(default_file_name(stem, &config.extension, now)));
    }

    if !is_plain_file_name(trimmed) {
        return Err(InputError::InvalidFileName(trimmed.to_string()));
    }

    let has_extension = Path::new(trimmed)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(config.extension.as_str()));

    let file_name = if has_extension {
        trimmed.to_string()
    } else {
        format!("{trimmed}.{}", config.extension)
    };

    Ok(config.output_dir.join(file_name))
}

/// A single path component that names a file: no separators, not `.` or `..`.
fn is_plain_file_name(name: &str) -> bool {
    if name.contains('/') || name.contains('\\') {
        return false;
    }

    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// First `max_chars` characters of `text`, with `...` when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}
