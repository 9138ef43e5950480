//! kitten-tts-rs CLI entry point.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use kitten_tts_rs::backend::create_backend;
use kitten_tts_rs::cli::Args;
use kitten_tts_rs::config::SessionConfig;
use kitten_tts_rs::engine::TTSEngine;
use kitten_tts_rs::interrupt::Interrupt;
use kitten_tts_rs::logging::init_logging;
use kitten_tts_rs::session::{LinePrompter, SessionController};
use tracing::{info, warn};

fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = init_logging(args.verbose)?;
    info!(engine = %args.engine_url(), output_dir = %args.output_dir.display(), "Starting");

    print_banner();
    if args.verbose {
        println!("Logging to: {}", log_file.display());
    }

    let interrupt = Interrupt::new();

    // Connect to the engine before asking anything
    let backend = create_backend(&args).context("Failed to create engine client")?;
    let engine = TTSEngine::new(backend).context("Failed to start engine client")?;

    println!("Connecting to KittenTTS engine at {}...", args.engine_url());
    let health = match engine.health_check(&interrupt) {
        Ok(health) => health,
        Err(e) if e.is_interrupt() => {
            info!("Interrupted while connecting to the engine");
            println!();
            println!("Goodbye!");
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "KittenTTS engine at {} is not reachable. Is the server running?",
                    args.engine_url()
                )
            });
        }
    };
    info!(model = %health.model, status = %health.status, "Engine ready");
    println!("Model loaded: {} ({})", health.model, health.status);

    for voice in health.missing_presets() {
        warn!("Engine does not list voice {voice}");
        println!("  Warning: engine does not list voice {voice}");
    }
    println!();

    let config = SessionConfig::from_args(&args);
    let prompter = LinePrompter::new(Some(LinePrompter::default_history_path()))
        .context("Failed to initialize terminal input")?;

    let mut controller = SessionController::new(config, engine, prompter, io::stdout(), interrupt);
    controller.run_loop();

    Ok(())
}

fn print_banner() {
    println!("{}", "=".repeat(60));
    println!("KittenTTS Interactive Session");
    println!("{}", "=".repeat(60));
    println!("Ultra-lightweight text-to-speech: pick a voice, a speed, and go.");
    println!("{}", "=".repeat(60));
    println!();
}
