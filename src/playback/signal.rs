//! Control signals between the player and its streaming handler
//!
//! Cancellation is cooperative: the engine cannot preempt an in-flight
//! handler, so control changes are broadcast on a [`SignalBus`] and the
//! handler observes them at its own poll points.

use tokio::sync::broadcast;

/// Control signal observed by a streaming handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Playback paused; stop producing output until `Resumed`
    Paused,
    /// Playback resumed after a pause
    Resumed,
    /// Abandon the current item promptly and return
    SkipRequested,
}

/// Receiver half handed to a streaming handler for one item
pub type SignalStream = broadcast::Receiver<Signal>;

/// One-to-many signal broadcast for a single player
///
/// Thin wrapper over `tokio::broadcast`. Emitting with no live subscriber is
/// normal (the worker may be between items) and is not an error.
#[derive(Debug)]
pub struct SignalBus {
    tx: broadcast::Sender<Signal>,
}

impl SignalBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all signals emitted after this call
    pub fn subscribe(&self) -> SignalStream {
        self.tx.subscribe()
    }

    /// Emit a signal to whatever handler is currently listening
    pub fn emit(&self, signal: Signal) {
        // send only fails with zero receivers, which is fine here
        let _ = self.tx.send(signal);
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new(16)
    }
}
