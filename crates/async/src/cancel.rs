//! Cooperative cancellation signal.
//!
//! A [`CancelToken`] is a cheaply clonable one-way latch: once cancelled
//! it stays cancelled, and every clone observes the same state. Operations
//! poll it synchronously via [`CancelToken::is_cancelled`] or suspend on
//! [`CancelToken::cancelled`]; the safe boundary translates an observed
//! cancellation into `failure(CANCELLED)`, never into a silent success.

use std::sync::Arc;

use tokio::sync::watch;

/// One-way cancellation latch shared between a pipeline and its caller.
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
    receiver: watch::Receiver<bool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Latch the token. Idempotent; wakes every waiter.
    pub fn cancel(&self) {
        // Send only fails with no receivers, and we always hold one.
        let _ = self.sender.send(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Suspend until the token is cancelled.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        // wait_for only errs when the sender is dropped; the token holds
        // the sender alive for as long as any clone exists.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
