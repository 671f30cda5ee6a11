//! Place-to-player registry
//!
//! Concurrency-safe mapping from a place identifier to its [`Player`],
//! created lazily on first use. The map lock is held only for lookup and
//! insert; all playback state lives behind each player's own lock, so
//! control traffic for unrelated places proceeds in parallel.
//!
//! Entries are never evicted: a drained place keeps its player and a later
//! play reuses it. Unbounded growth across very long deployments is a known,
//! accepted gap.

use crate::playback::player::Player;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Identifier of an independent playback destination
pub type PlaceId = u64;

/// Registry of players, one per place
///
/// Construct once at startup and pass explicitly into the command layer;
/// tests get their own fresh registries.
pub struct Registry<T> {
    players: RwLock<HashMap<PlaceId, Arc<Player<T>>>>,
}

impl<T> Registry<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            players: RwLock::new(HashMap::new()),
        }
    }

    /// Look up the player for a place, if one was ever registered
    pub async fn get(&self, place: PlaceId) -> Option<Arc<Player<T>>> {
        self.players.read().await.get(&place).cloned()
    }

    /// Register a place's player
    ///
    /// Publishing is the caller's last setup step: a player must not become
    /// visible here until its sink is joined, so that `get` never hands out
    /// a half-initialized entry.
    pub async fn set(&self, place: PlaceId, player: Arc<Player<T>>) {
        self.players.write().await.insert(place, player);
        debug!(place, "player registered");
    }

    /// Number of places that ever played something
    pub async fn len(&self) -> usize {
        self.players.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.players.read().await.is_empty()
    }
}

impl<T> Default for Registry<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
