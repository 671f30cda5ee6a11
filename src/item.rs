//! Playable item payload
//!
//! The engine is generic over an opaque item type; [`Track`] is the canonical
//! payload used by the command layer: a streamable source reference plus a
//! display title. The engine never interprets either field.

use serde::{Deserialize, Serialize};

/// A playable track: source reference plus display title
///
/// Immutable once enqueued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Streamable source reference (e.g., a media URL)
    pub reference: String,
    /// Human-readable title for queue display
    pub title: String,
}

impl Track {
    pub fn new(reference: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            title: title.into(),
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}
