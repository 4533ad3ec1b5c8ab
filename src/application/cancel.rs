//! One-shot cancellation shared by every submitter of a run.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Broadcast-once stop flag.
///
/// Cloning shares the same flag. Once set it stays set; setting it again is
/// a no-op. Submitters check it at poll boundaries only, so in-flight
/// requests always complete.
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl CancellationSignal {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Set the flag and wake every waiter.
    pub fn cancel(&self) {
        self.tx.send_if_modified(|cancelled| {
            let changed = !*cancelled;
            *cancelled = true;
            changed
        });
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the flag is set.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Sleep for `duration` unless cancelled first.
    ///
    /// Returns `true` if the flag is set when the sleep ends.
    pub async fn sleep(&self, duration: Duration) -> bool {
        tokio::select! {
            () = tokio::time::sleep(duration) => self.is_cancelled(),
            () = self.cancelled() => true,
        }
    }
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}
