//! Shared "stop now" signal.

use std::sync::Arc;

use tokio::sync::watch;

/// Flag raised when the user asks the program to stop.
///
/// Cloning is cheap; all clones observe the same flag. The engine raises
/// it when Ctrl-C arrives during a blocking call, and the session checks
/// it before every prompt.
#[derive(Debug, Clone)]
pub struct Interrupt {
    raised: Arc<watch::Sender<bool>>,
}

impl Interrupt {
    pub fn new() -> Self {
        let (raised, _) = watch::channel(false);
        Self {
            raised: Arc::new(raised),
        }
    }

    /// Raise the flag.
    pub fn trigger(&self) {
        self.raised.send_replace(true);
    }

    /// Whether an interrupt has been received.
    pub fn is_triggered(&self) -> bool {
        *self.raised.borrow()
    }

    /// Resolves once the flag is raised, immediately if it already is.
    pub async fn triggered(&self) {
        let mut rx = self.raised.subscribe();
        if rx.wait_for(|raised| *raised).await.is_err() {
            // The sender lives as long as `self`.
            std::future::pending::<()>().await;
        }
    }
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}
