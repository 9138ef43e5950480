//! TTS Engine implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use crate::backend::{Backend, BackendError, HealthResponse, SynthesisRequest};
use crate::interrupt::Interrupt;

use super::output::{OutputFile, save_audio};

/// Errors that can occur while producing an audio file.
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Synthesis failed: {0}")]
    Backend(#[from] BackendError),

    #[error("Could not save audio to {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Interrupted")]
    Interrupted,

    #[error("Engine call failed: {0}")]
    WorkerLost(String),

    #[error("Failed to start engine runtime: {0}")]
    Runtime(std::io::Error),
}

impl SynthesisError {
    /// Whether the session must stop rather than report and continue.
    pub fn is_interrupt(&self) -> bool {
        matches!(self, SynthesisError::Interrupted)
    }
}

/// Wraps the engine boundary with interruptible calls and persistence.
pub struct TTSEngine<B: Backend + 'static> {
    backend: Arc<B>,
    runtime: Option<Runtime>,
}

impl<B: Backend + 'static> TTSEngine<B> {
    /// Create a new TTS engine.
    pub fn new(backend: B) -> Result<Self, SynthesisError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SynthesisError::Runtime)?;

        Ok(Self {
            backend: Arc::new(backend),
            runtime: Some(runtime),
        })
    }

    /// Check engine health status. Ctrl-C abandons the check.
    pub fn health_check(&self, interrupt: &Interrupt) -> Result<HealthResponse, SynthesisError> {
        self.interruptible(interrupt, |backend| backend.health())
    }

    /// Synthesize speech, giving up as soon as Ctrl-C arrives or
    /// `interrupt` is raised.
    pub fn synthesize(
        &self,
        request: &SynthesisRequest,
        interrupt: &Interrupt,
    ) -> Result<Vec<u8>, SynthesisError> {
        info!(
            voice = %request.voice,
            speed = request.speed,
            chars = request.text.chars().count(),
            "Synthesizing"
        );

        let owned = request.clone();
        let audio = self.interruptible(interrupt, move |backend| backend.synthesize(&owned))?;
        debug!(bytes = audio.len(), "Engine returned audio");
        Ok(audio)
    }

    /// Run a blocking engine call, racing it against Ctrl-C and `interrupt`.
    ///
    /// An abandoned call keeps running on the blocking pool; its result is
    /// dropped.
    fn interruptible<T, F>(&self, interrupt: &Interrupt, call: F) -> Result<T, SynthesisError>
    where
        T: Send + 'static,
        F: FnOnce(&B) -> Result<T, BackendError> + Send + 'static,
    {
        if interrupt.is_triggered() {
            return Err(SynthesisError::Interrupted);
        }

        let Some(runtime) = &self.runtime else {
            return Err(SynthesisError::WorkerLost("engine runtime is shut down".to_string()));
        };
        let backend = Arc::clone(&self.backend);

        runtime.block_on(async {
            tokio::select! {
                joined = tokio::task::spawn_blocking(move || call(&backend)) => match joined {
                    Ok(result) => Ok(result?),
                    Err(e) => Err(SynthesisError::WorkerLost(e.to_string())),
                },
                Ok(()) = tokio::signal::ctrl_c() => {
                    warn!("Ctrl-C during engine call");
                    interrupt.trigger();
                    Err(SynthesisError::Interrupted)
                }
                () = interrupt.triggered() => {
                    warn!("Engine call abandoned after interrupt");
                    Err(SynthesisError::Interrupted)
                }
            }
        })
    }

    /// Persist audio returned by [`TTSEngine::synthesize`].
    pub fn save(&self, audio: &[u8], path: &Path) -> Result<OutputFile, SynthesisError> {
        let output = save_audio(audio, path)?;
        info!(path = %output.path.display(), bytes = output.size_bytes, "Audio saved");
        Ok(output)
    }

    /// Synthesize and, only on success, write the audio to `path`.
    pub fn synthesize_and_save(
        &self,
        request: &SynthesisRequest,
        path: &Path,
        interrupt: &Interrupt,
    ) -> Result<OutputFile, SynthesisError> {
        let audio = self.synthesize(request, interrupt)?;
        self.save(&audio, path)
    }
}

impl<B: Backend + 'static> Drop for TTSEngine<B> {
    fn drop(&mut self) {
        // Do not wait for abandoned engine calls.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
