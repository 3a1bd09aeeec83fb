//! Cancellable one-shot timer for reward expiry.
//!
//! The unlock machine itself is wall-clock driven (`tick`), which keeps it
//! deterministic. Long-running drivers that want a push-style expiry instead
//! of polling schedule one of these per reward entry; scheduling again or
//! leaving the reward view cancels the previous instance, so a delayed expiry
//! can never fire against a later state.

use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub struct RewardTimer {
    handle: Option<JoinHandle<()>>,
}

impl RewardTimer {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Schedule `on_expiry` to run after `delay`, cancelling any previously
    /// scheduled callback first. Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, on_expiry: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_expiry();
        }));
    }

    /// Abort the pending callback, if any. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether an expiry is still pending.
    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for RewardTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
