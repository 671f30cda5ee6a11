//! # boombox
//!
//! Per-place background audio playback engine.
//!
//! **Purpose:** serialize a mutable queue of playable items against
//! concurrent control commands (play, pause, resume, skip, loop) while a
//! long-running worker streams each item through an external decode/transmit
//! pipeline.
//!
//! **Architecture:** one [`playback::Player`] per place, held in a shared
//! [`playback::Registry`]; exactly one tokio worker task per active player;
//! cooperative cancellation via a broadcast [`playback::SignalBus`] the
//! streaming handler observes. The [`control::Controller`] is the narrow
//! surface a chat-command layer drives.
//!
//! The engine is generic over the item payload; [`item::Track`] is the
//! canonical reference-plus-title payload. Collaborators (search, metadata
//! extraction, sink join) are consumed through the traits in [`sources`].

pub mod control;
pub mod error;
pub mod item;
pub mod playback;
pub mod sources;

pub use control::Controller;
pub use error::{Error, Result, UserError};
pub use item::Track;
pub use playback::{PlaceId, PlaybackState, Player, Registry, Signal, SignalStream, StreamHandler};
pub use sources::{MetadataExtractor, SearchProvider, Sink};
