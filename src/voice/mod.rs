//! Voice presets offered by the KittenTTS engine.
//!
//! The catalog is closed: the engine ships eight expressive voices and
//! nothing can be registered at runtime.

mod preset;

pub use preset::{UnknownVoice, VoicePreset};
