//! Room registry: room id to game engine, created lazily, never removed.
//!
//! The table itself sits behind an `RwLock` that is only held long enough
//! to look up or insert a handle. Each engine has its own `Mutex`, so moves
//! in different rooms never contend.

use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use tracing::info;

use super::room_id::RoomId;
use crate::core::{EngineConfig, GameRng, StreamKind};
use crate::engine::{GameEngine, Snapshot};

/// Shared handle to one room's engine.
///
/// Cloning is cheap; all clones address the same engine.
#[derive(Clone, Debug)]
pub struct RoomHandle {
    id: RoomId,
    engine: Arc<Mutex<GameEngine>>,
}

impl RoomHandle {
    fn new(id: RoomId, engine: GameEngine) -> Self {
        Self {
            id,
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// Run `f` with exclusive access to the engine.
    ///
    /// Every engine call completes before the lock is released, so a
    /// poisoned lock still guards a consistent engine and is recovered.
    pub fn with<R>(&self, f: impl FnOnce(&mut GameEngine) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// True when both handles address the same engine.
    pub fn same_room(&self, other: &RoomHandle) -> bool {
        Arc::ptr_eq(&self.engine, &other.engine)
    }

    fn lock(&self) -> MutexGuard<'_, GameEngine> {
        self.engine
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Owns every room's engine for the life of the process.
#[derive(Debug)]
pub struct RoomRegistry {
    config: EngineConfig,
    base_rng: GameRng,
    rooms: RwLock<FxHashMap<RoomId, RoomHandle>>,
}

impl RoomRegistry {
    /// Create an empty registry. The config should already be validated.
    pub fn new(config: EngineConfig) -> Self {
        let base_rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self {
            config,
            base_rng,
            rooms: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Handle for `id`, creating a fresh game on first reference.
    ///
    /// Concurrent first references to the same id create exactly one engine.
    pub fn get_or_create(&self, id: &RoomId) -> RoomHandle {
        if let Some(handle) = self.get(id) {
            return handle;
        }

        let mut rooms = self
            .rooms
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rooms
            .entry(id.clone())
            .or_insert_with(|| {
                info!(room = %id, "Created room");
                RoomHandle::new(id.clone(), self.new_engine(id))
            })
            .clone()
    }

    /// Handle for `id` if the room exists.
    pub fn get(&self, id: &RoomId) -> Option<RoomHandle> {
        self.rooms
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(id)
            .cloned()
    }

    /// Number of rooms created so far.
    pub fn len(&self) -> usize {
        self.rooms
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of all rooms, sorted.
    pub fn room_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<_> = self
            .rooms
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    /// Each room draws eviction choices from its own stream of the base seed.
    fn new_engine(&self, id: &RoomId) -> GameEngine {
        let rng = self.base_rng.for_stream(StreamKind::Eviction, id.as_str());
        GameEngine::with_policy(rng, self.config.reset_policy)
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
