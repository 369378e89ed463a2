//! One-shot stop signal handed to `SimpleJsonServer::run`.
//!
//! `startup::serve` fires it once SIGINT or SIGTERM arrives. The server
//! then stops accepting connections and lets in-flight dispatches finish
//! before `run` returns.

use tokio::sync::broadcast;

/// Sender side of the stop signal.
///
/// Each `run` call takes its own receiver from `subscribe`, so several
/// servers (e.g. in tests) can share one coordinator.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to pass to `SimpleJsonServer::run`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Tell every subscribed server to drain and stop.
    ///
    /// A no-op when no server is running.
    pub fn trigger(&self) {
        let servers = self.tx.receiver_count();
        tracing::info!(servers, "Stopping HTTP listeners");
        let _ = self.tx.send(());
    }

    /// Servers that have not yet observed the signal.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
