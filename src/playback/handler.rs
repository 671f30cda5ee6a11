//! Streaming handler contract
//!
//! The boundary between the engine and the external decode/transmit pipeline.
//! The engine owns queue and state; the handler owns the actual streaming of
//! one item into the destination sink.

use crate::error::Result;
use crate::playback::signal::SignalStream;
use async_trait::async_trait;

/// Streams one item to its destination
///
/// Implementations typically spawn an external decoding process and pump its
/// output into the sink for the duration of the item.
///
/// # Contract
///
/// - Observe `signals` for [`Signal::Paused`](crate::playback::signal::Signal)
///   and `SkipRequested` at reasonable internal poll points; stop producing
///   output (or return, for skip) promptly when observed. Never busy-loop.
/// - On a lagged signal stream (`RecvError::Lagged`), re-sync by consulting
///   the player's state rather than assuming nothing changed.
/// - Terminate the spawned process and release its resources on every exit
///   path: natural completion, skip, pause-then-skip, internal error.
/// - Return `Err` only for unrecoverable I/O/process failures. Whether a
///   source is playable at all is decided before the item is ever appended,
///   not here.
///
/// Resume semantics (continue mid-stream vs restart the item) are a property
/// of the implementation, not guaranteed by the engine. Document them per
/// handler.
#[async_trait]
pub trait StreamHandler<T>: Send + Sync {
    /// Stream `item` to completion, skip, or failure
    ///
    /// The engine blocks the place's worker on this call; a stalled handler
    /// stalls the place indefinitely.
    async fn stream(&self, item: &T, signals: SignalStream) -> Result<()>;
}
