//! The fixed catalog of KittenTTS voice presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a catalog voice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown voice: {0}")]
pub struct UnknownVoice(pub String);

/// One of the eight expressive voices shipped with the KittenTTS model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VoicePreset {
    #[serde(rename = "expr-voice-2-m")]
    Voice2Male,
    #[default]
    #[serde(rename = "expr-voice-2-f")]
    Voice2Female,
    #[serde(rename = "expr-voice-3-m")]
    Voice3Male,
    #[serde(rename = "expr-voice-3-f")]
    Voice3Female,
    #[serde(rename = "expr-voice-4-m")]
    Voice4Male,
    #[serde(rename = "expr-voice-4-f")]
    Voice4Female,
    #[serde(rename = "expr-voice-5-m")]
    Voice5Male,
    #[serde(rename = "expr-voice-5-f")]
    Voice5Female,
}

impl VoicePreset {
    /// Every preset, in catalog order. Position `i` has index `i + 1`.
    pub const ALL: [VoicePreset; 8] = [
        VoicePreset::Voice2Male,
        VoicePreset::Voice2Female,
        VoicePreset::Voice3Male,
        VoicePreset::Voice3Female,
        VoicePreset::Voice4Male,
        VoicePreset::Voice4Female,
        VoicePreset::Voice5Male,
        VoicePreset::Voice5Female,
    ];

    /// Returns the identifier the engine expects, e.g. `expr-voice-2-f`.
    pub fn id(&self) -> &'static str {
        match self {
            VoicePreset::Voice2Male => "expr-voice-2-m",
            VoicePreset::Voice2Female => "expr-voice-2-f",
            VoicePreset::Voice3Male => "expr-voice-3-m",
            VoicePreset::Voice3Female => "expr-voice-3-f",
            VoicePreset::Voice4Male => "expr-voice-4-m",
            VoicePreset::Voice4Female => "expr-voice-4-f",
            VoicePreset::Voice5Male => "expr-voice-5-m",
            VoicePreset::Voice5Female => "expr-voice-5-f",
        }
    }

    /// Returns the human-readable description shown in the catalog.
    pub fn description(&self) -> String {
        let gender = if self.is_female() { "Female" } else { "Male" };
        format!("{gender} Voice #{} - Expressive", self.style())
    }

    /// Returns the 1-based catalog index.
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|voice| voice == self)
            .map_or(0, |pos| pos + 1)
    }

    /// Looks up a preset by its 1-based catalog index.
    pub fn from_index(index: usize) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|pos| Self::ALL.get(pos))
            .copied()
    }

    fn style(&self) -> u8 {
        match self {
            VoicePreset::Voice2Male | VoicePreset::Voice2Female => 2,
            VoicePreset::Voice3Male | VoicePreset::Voice3Female => 3,
            VoicePreset::Voice4Male | VoicePreset::Voice4Female => 4,
            VoicePreset::Voice5Male | VoicePreset::Voice5Female => 5,
        }
    }

    fn is_female(&self) -> bool {
        matches!(
            self,
            VoicePreset::Voice2Female
                | VoicePreset::Voice3Female
                | VoicePreset::Voice4Female
                | VoicePreset::Voice5Female
        )
    }
}

impl fmt::Display for VoicePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for VoicePreset {
    type Err = UnknownVoice;

    /// Accepts either a catalog identifier or its 1-based index.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();

        if let Ok(index) = trimmed.parse::<usize>() {
            return Self::from_index(index).ok_or_else(|| UnknownVoice(trimmed.to_string()));
        }

        Self::ALL
            .iter()
            .find(|voice| voice.id().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| UnknownVoice(trimmed.to_string()))
    }
}
