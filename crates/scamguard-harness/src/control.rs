//! Run control: external stop signal and run termination state

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

/// Stop signal shared between a runner and whoever drives it.
///
/// Runners check the signal between messages; a call to `classify` that is
/// already in flight is allowed to finish.
#[derive(Clone)]
pub struct StopSignal {
    sender: Arc<watch::Sender<bool>>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Request that every runner holding this signal stops
    pub fn stop(&self) {
        self.sender.send_replace(true);
    }

    /// Check if a stop has been requested
    pub fn is_stopped(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolve once a stop has been requested
    pub async fn stopped(&self) {
        let mut receiver = self.sender.subscribe();
        while !*receiver.borrow_and_update() {
            if receiver.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StopSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopSignal")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

/// How a run ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Termination {
    /// All work done (or the stream duration elapsed)
    #[default]
    Completed,
    /// Stopped early by a stop signal
    Cancelled,
}
