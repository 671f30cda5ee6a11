//! Per-place playback engine
//!
//! One [`Player`] per place: an ordered queue, a playback state, a signal
//! bus, and exactly one worker task while active. Control calls arrive from
//! many concurrent callers and interleave with the worker through a single
//! per-player lock; unrelated places never contend.

use crate::error::UserError;
use crate::playback::handler::StreamHandler;
use crate::playback::signal::{Signal, SignalBus, SignalStream};
use crate::playback::state::PlaybackState;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Queue, state, and worker-liveness for one place
///
/// `active` is cleared by the worker inside the same critical section that
/// observes the drained queue, so an acknowledged append is never lost
/// between "worker saw empty" and "worker exited".
struct PlayerInner<T> {
    queue: VecDeque<T>,
    /// Items already played this activation, in play order; the loop refill
    /// source
    history: Vec<T>,
    state: PlaybackState,
    active: bool,
}

/// Per-place playback engine instance
///
/// The streaming handler is supplied at construction and immutable
/// afterward. Cheap to share: clone the surrounding `Arc`.
pub struct Player<T> {
    inner: RwLock<PlayerInner<T>>,
    signals: SignalBus,
    handler: Arc<dyn StreamHandler<T>>,
}

impl<T> Player<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(handler: Arc<dyn StreamHandler<T>>) -> Arc<Self> {
        Arc::new(Self {
            inner: RwLock::new(PlayerInner {
                queue: VecDeque::new(),
                history: Vec::new(),
                state: PlaybackState::Playing,
                active: false,
            }),
            signals: SignalBus::default(),
            handler,
        })
    }

    /// Append an item at the queue tail
    ///
    /// Always succeeds; visible to the very next snapshot or worker read.
    pub async fn append(&self, item: T) {
        let mut inner = self.inner.write().await;
        inner.queue.push_back(item);
        debug!(queue_len = inner.queue.len(), "item appended");
    }

    /// Launch the worker task if it is not already running
    ///
    /// A fresh activation resets state to `Playing` and clears the loop
    /// history. Calling this while a worker is active is a no-op, so callers
    /// may invoke it unconditionally after an append.
    pub async fn start(self: &Arc<Self>) {
        let signals = {
            let mut inner = self.inner.write().await;
            if inner.active {
                return;
            }
            inner.active = true;
            inner.state = PlaybackState::Playing;
            inner.history.clear();
            // Subscribe while still holding the lock: any signal emitted
            // after start() returns is guaranteed to reach the worker.
            self.signals.subscribe()
        };
        let player = Arc::clone(self);
        tokio::spawn(async move {
            player.run_worker(signals).await;
        });
    }

    /// Pause playback
    ///
    /// Only valid from `Playing`; pausing an already-paused (or looping)
    /// player reports `NotPlaying`. This non-idempotence is a compatibility
    /// contract, not an accident.
    pub async fn pause(&self) -> Result<(), UserError> {
        let mut inner = self.inner.write().await;
        if !inner.active || inner.state != PlaybackState::Playing {
            return Err(UserError::NotPlaying);
        }
        inner.state = PlaybackState::Paused;
        self.signals.emit(Signal::Paused);
        info!("playback paused");
        Ok(())
    }

    /// Resume from a pause
    pub async fn resume(&self) -> Result<(), UserError> {
        let mut inner = self.inner.write().await;
        if !inner.active {
            return Err(UserError::NotPlaying);
        }
        if inner.state != PlaybackState::Paused {
            return Err(UserError::NotPaused);
        }
        inner.state = PlaybackState::Playing;
        self.signals.emit(Signal::Resumed);
        info!("playback resumed");
        Ok(())
    }

    /// Request the current item be abandoned
    ///
    /// State is unchanged; the queue advances when the handler notices the
    /// signal and returns.
    pub async fn skip(&self) -> Result<(), UserError> {
        let inner = self.inner.read().await;
        if !inner.active {
            return Err(UserError::NotPlaying);
        }
        self.signals.emit(Signal::SkipRequested);
        info!("skip requested");
        Ok(())
    }

    /// Switch to loop-all: the queue refills from the played history when it
    /// drains
    pub async fn loop_on(&self) -> Result<(), UserError> {
        let mut inner = self.inner.write().await;
        if !inner.active {
            return Err(UserError::NotPlaying);
        }
        inner.state = PlaybackState::LoopingAll;
        info!("looping enabled");
        Ok(())
    }

    /// Switch looping off, back to plain playback
    pub async fn loop_off(&self) -> Result<(), UserError> {
        let mut inner = self.inner.write().await;
        if !inner.active {
            return Err(UserError::NotPlaying);
        }
        if inner.state != PlaybackState::LoopingAll {
            return Err(UserError::NotLooping);
        }
        inner.state = PlaybackState::Playing;
        info!("looping disabled");
        Ok(())
    }

    /// Consistent snapshot of the current state
    pub async fn state(&self) -> PlaybackState {
        self.inner.read().await.state
    }

    /// Whether a worker task is currently running for this player
    pub async fn is_active(&self) -> bool {
        self.inner.read().await.active
    }

    /// Ordered queue contents, head first; the current item is included
    pub async fn queue_snapshot(&self) -> Result<Vec<T>, UserError> {
        let inner = self.inner.read().await;
        if !inner.active {
            return Err(UserError::NotPlaying);
        }
        Ok(inner.queue.iter().cloned().collect())
    }

    /// Worker loop: one item at a time until the queue drains
    ///
    /// The handler is never preempted; a per-item failure is logged and
    /// treated as completion so one bad item cannot stop the place's queue.
    /// The signal receiver is renewed under the same lock that advances the
    /// queue, so every emitted signal reaches whichever item is current.
    async fn run_worker(self: Arc<Self>, mut signals: SignalStream) {
        debug!("playback worker started");
        loop {
            let head = {
                let inner = self.inner.read().await;
                inner.queue.front().cloned()
            };
            let item = match head {
                Some(item) => item,
                None => {
                    // Possible only when start() raced an empty queue
                    let mut inner = self.inner.write().await;
                    if inner.queue.is_empty() {
                        inner.active = false;
                        break;
                    }
                    continue;
                }
            };

            if let Err(e) = self.handler.stream(&item, signals).await {
                warn!(error = %e, "item stream failed, advancing past it");
            }

            let mut inner = self.inner.write().await;
            signals = self.signals.subscribe();
            if let Some(done) = inner.queue.pop_front() {
                inner.history.push(done);
            }
            if inner.queue.is_empty() {
                if inner.state == PlaybackState::LoopingAll && !inner.history.is_empty() {
                    inner.queue = std::mem::take(&mut inner.history).into();
                    debug!(queue_len = inner.queue.len(), "queue refilled for loop");
                } else {
                    inner.active = false;
                    info!("queue drained, worker exiting");
                    break;
                }
            }
        }
    }
}
