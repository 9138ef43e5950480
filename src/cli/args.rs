//! CLI argument definitions and parsing.

use clap::Parser;
use std::path::PathBuf;

/// Default port of the KittenTTS server.
pub const DEFAULT_PORT: u16 = 8300;

/// Interactive text-to-speech using the KittenTTS model.
///
/// Every option has a default; text, voice, speed and file name are asked
/// for interactively.
#[derive(Parser, Debug)]
#[command(name = "kitten-tts-rs")]
#[command(about = "Interactive text-to-speech using the KittenTTS model")]
#[command(version)]
pub struct Args {
    /// KittenTTS engine host address
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// KittenTTS engine port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Seconds to wait for the engine before giving up on a request
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,

    /// Directory where generated audio is saved
    #[arg(short, long, default_value = "generated_audio")]
    pub output_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Returns the base URL of the engine.
    pub fn engine_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
