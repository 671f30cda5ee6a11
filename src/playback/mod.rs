//! Playback engine: per-place players, their registry, and the streaming
//! handler contract

pub mod handler;
pub mod player;
pub mod registry;
pub mod signal;
pub mod state;

pub use handler::StreamHandler;
pub use player::Player;
pub use registry::{PlaceId, Registry};
pub use signal::{Signal, SignalBus, SignalStream};
pub use state::PlaybackState;
