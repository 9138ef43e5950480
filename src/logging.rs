//! Diagnostic logging.
//!
//! Stdout belongs to the interactive prompts, so tracing output goes to a
//! log file instead.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::app_data_dir;

const LOG_FILE: &str = "kitten-tts-rs.log";

/// Install the global subscriber and return the log file path.
///
/// `RUST_LOG` overrides the level; otherwise `info`, or `debug` when
/// `verbose` is set.
pub fn init_logging(verbose: bool) -> Result<PathBuf> {
    let log_dir = app_data_dir();
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let log_file = log_dir.join(LOG_FILE);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("kitten_tts_rs={default_level}")));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(log_file)
}
