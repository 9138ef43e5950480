//! kitten-tts-rs: interactive text-to-speech CLI.
//!
//! This crate prompts for text, a voice preset and a speed, sends them to
//! a KittenTTS engine and saves the returned audio as WAV files.

pub mod backend;
pub mod cli;
pub mod config;
pub mod engine;
pub mod interrupt;
pub mod logging;
pub mod session;
pub mod voice;
