//! Error types for boombox
//!
//! Defines module-specific error types using thiserror for clear error propagation.
//!
//! Errors come in three tiers:
//! - User errors ([`UserError`]): expected outcomes of control commands,
//!   rendered verbatim to the user and never logged as failures.
//! - System errors (remaining [`Error`] variants): sink join failures, search
//!   provider failures, extraction I/O failures; propagated as hard errors.
//! - Per-item streaming errors: caught at the worker boundary, logged, and
//!   treated as item completion (see `playback::player`).

use thiserror::Error;

/// Expected, user-visible command errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserError {
    /// No player exists for the place, or its worker has drained and exited
    #[error("nothing is playing here")]
    NotPlaying,

    /// Resume called while not paused
    #[error("playback is not paused")]
    NotPaused,

    /// LoopOff called while not looping
    #[error("playback is not looping")]
    NotLooping,

    /// The requested source could not be resolved to a playable item
    #[error("that source is not supported")]
    SourceNotSupported,
}

/// Main error type for boombox
#[derive(Error, Debug)]
pub enum Error {
    /// Expected user-facing command error
    #[error(transparent)]
    User(#[from] UserError),

    /// Destination sink could not be joined
    #[error("sink join error: {0}")]
    SinkJoin(String),

    /// Search provider failure
    #[error("search error: {0}")]
    Search(String),

    /// Metadata extraction failure outside the "unsupported source" case
    #[error("extraction error: {0}")]
    Extract(String),

    /// Streaming pipeline failure (handler-reported)
    #[error("stream error: {0}")]
    Stream(String),
}

impl Error {
    /// The user-facing kind, if this is a user-tier error
    pub fn user_error(&self) -> Option<UserError> {
        match self {
            Error::User(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Convenience Result type using boombox Error
pub type Result<T> = std::result::Result<T, Error>;
