//! # Cancellation Tokens
//!
//! A token marks one armed hardware operation. Once cancelled it stays
//! cancelled, and anything still holding it must treat its events as stale.

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct CancelToken {
    generation: u64,
    cancelled: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new(generation: u64) -> Self {
        let (cancelled, _) = watch::channel(false);
        Self {
            generation,
            cancelled: Arc::new(cancelled),
        }
    }

    /// Sequence number of the operation this token was minted for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.cancelled.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Resolves once the token is cancelled. Resolves immediately if it already is.
    pub async fn cancelled(&self) {
        let mut rx = self.cancelled.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}
