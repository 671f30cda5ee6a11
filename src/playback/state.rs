//! Playback state management

use serde::{Deserialize, Serialize};

/// Playback state of one place's player
///
/// Skip is not a state: it is a transient signal layered on top of whatever
/// state the player is in (see `playback::signal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
    /// Queue refills from the played history when it drains
    LoopingAll,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Playing => write!(f, "playing"),
            PlaybackState::Paused => write!(f, "paused"),
            PlaybackState::LoopingAll => write!(f, "looping"),
        }
    }
}
