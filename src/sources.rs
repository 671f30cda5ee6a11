//! Collaborator seams for item resolution and sink access
//!
//! The engine consumes these through trait objects only; concrete
//! implementations (video search APIs, command-line metadata extractors,
//! voice-channel join logic) live outside this crate.

use crate::error::Result;
use crate::playback::registry::PlaceId;
use async_trait::async_trait;

/// Resolves free-text queries to a playable item
#[async_trait]
pub trait SearchProvider<T>: Send + Sync {
    /// Find the best match for `query`
    ///
    /// Returns `Error::User(SourceNotSupported)` when nothing playable
    /// matches; any other error is a provider failure.
    async fn search(&self, query: &str) -> Result<T>;
}

/// Resolves a direct source reference to a playable item
///
/// Typically wraps an external command-line tool that probes the reference
/// and reports a streamable URL plus title.
#[async_trait]
pub trait MetadataExtractor<T>: Send + Sync {
    /// Probe `reference` and build the item
    ///
    /// Returns `Error::User(SourceNotSupported)` when the tool rejects the
    /// reference; I/O failures around the tool itself surface as system
    /// errors.
    async fn extract(&self, reference: &str) -> Result<T>;
}

/// Destination the engine's output is transmitted into
#[async_trait]
pub trait Sink: Send + Sync {
    /// Join the destination for a place
    ///
    /// Invoked once, when the place's player is first created, before any
    /// item is streamed.
    async fn join(&self, place: PlaceId) -> Result<()>;
}
