//! Restartable single-shot debounce timer
//!
//! The desktop toolkit this replaces drove its search boxes with a
//! single-shot timer restarted on every keystroke. Here that is a
//! spawned sleep task whose handle is aborted and replaced on each
//! schedule, so only the most recent fire is ever honored.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Delay between the last keystroke and a search recompute
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Single-shot restartable timer
#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Run `fire` after the delay, replacing any pending fire. The
    /// previous task is aborted, never run late.
    pub async fn schedule<F>(&self, fire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            fire.await;
        }));
    }

    /// Drop any pending fire without running it
    pub async fn cancel(&self) {
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
