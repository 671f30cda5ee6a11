//! Command-layer operations
//!
//! [`Controller`] is the surface the chat-command dispatcher calls into: one
//! operation per user command, each taking the place identifier. It owns no
//! playback state itself; everything lives in the registry's players.
//!
//! Errors follow the three-tier model: `Error::User` carries expected,
//! user-visible outcomes; everything else is a system failure for the
//! command layer to report generically.

use crate::error::{Error, Result, UserError};
use crate::playback::player::Player;
use crate::playback::registry::{PlaceId, Registry};
use crate::playback::StreamHandler;
use crate::sources::{MetadataExtractor, SearchProvider, Sink};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Command-layer front end over the playback engine
pub struct Controller<T> {
    registry: Arc<Registry<T>>,
    handler: Arc<dyn StreamHandler<T>>,
    search: Arc<dyn SearchProvider<T>>,
    extractor: Arc<dyn MetadataExtractor<T>>,
    sink: Arc<dyn Sink>,
    /// Per-place setup serialization: concurrent first plays for one place
    /// wait here while the winner joins the sink and publishes the player.
    /// Entries are retained like registry entries are.
    setup_locks: Mutex<HashMap<PlaceId, Arc<Mutex<()>>>>,
}

impl<T> Controller<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Build a controller over an explicitly supplied registry
    ///
    /// The registry is passed in rather than owned globally so tests (and
    /// multi-tenant embeddings) can run isolated instances.
    pub fn new(
        registry: Arc<Registry<T>>,
        handler: Arc<dyn StreamHandler<T>>,
        search: Arc<dyn SearchProvider<T>>,
        extractor: Arc<dyn MetadataExtractor<T>>,
        sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            registry,
            handler,
            search,
            extractor,
            sink,
            setup_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve `args` to an item, enqueue it, and make sure the place is
    /// playing
    ///
    /// A direct `http(s)` reference goes through the metadata extractor;
    /// anything else is treated as a free-text search query. The sink is
    /// joined exactly once, before the place's player is published, so no
    /// caller can stream into an unjoined sink; a failed join publishes
    /// nothing and the next play retries. The resolved item is returned for
    /// "now queued" style display.
    pub async fn play(&self, place: PlaceId, args: &str) -> Result<T> {
        let item = if is_direct_reference(args) {
            debug!(place, reference = args, "resolving direct reference");
            self.extractor.extract(args).await?
        } else {
            debug!(place, query = args, "resolving via search");
            self.search.search(args).await?
        };

        // fast path: a published player always has a joined sink
        if let Some(player) = self.registry.get(place).await {
            player.append(item.clone()).await;
            player.start().await;
            return Ok(item);
        }

        let setup = self.setup_lock(place).await;
        let _guard = setup.lock().await;

        // re-check: another caller may have finished setup while we waited
        if let Some(player) = self.registry.get(place).await {
            player.append(item.clone()).await;
            player.start().await;
            return Ok(item);
        }

        self.sink.join(place).await?;
        info!(place, "sink joined");

        let player = Player::new(Arc::clone(&self.handler));
        player.append(item.clone()).await;
        self.registry.set(place, Arc::clone(&player)).await;
        player.start().await;
        Ok(item)
    }

    pub async fn pause(&self, place: PlaceId) -> Result<()> {
        self.active_player(place).await?.pause().await?;
        Ok(())
    }

    pub async fn resume(&self, place: PlaceId) -> Result<()> {
        self.active_player(place).await?.resume().await?;
        Ok(())
    }

    pub async fn skip(&self, place: PlaceId) -> Result<()> {
        self.active_player(place).await?.skip().await?;
        Ok(())
    }

    pub async fn loop_on(&self, place: PlaceId) -> Result<()> {
        self.active_player(place).await?.loop_on().await?;
        Ok(())
    }

    pub async fn loop_off(&self, place: PlaceId) -> Result<()> {
        self.active_player(place).await?.loop_off().await?;
        Ok(())
    }

    /// Ordered queue contents for display, head (current item) first
    pub async fn queue(&self, place: PlaceId) -> Result<Vec<T>> {
        let snapshot = self.active_player(place).await?.queue_snapshot().await?;
        Ok(snapshot)
    }

    async fn active_player(&self, place: PlaceId) -> Result<Arc<Player<T>>> {
        self.registry
            .get(place)
            .await
            .ok_or_else(|| Error::from(UserError::NotPlaying))
    }

    async fn setup_lock(&self, place: PlaceId) -> Arc<Mutex<()>> {
        let mut locks = self.setup_locks.lock().await;
        Arc::clone(locks.entry(place).or_default())
    }
}

/// Whether the play argument is itself a streamable reference
fn is_direct_reference(args: &str) -> bool {
    args.starts_with("http://") || args.starts_with("https://")
}
