//! Engine configuration.
//!
//! Callers build an `EngineConfig` at startup and hand it to the
//! `RoomRegistry`, which uses it for every room it creates.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Room name used when a route carries no room segment.
pub const DEFAULT_ROOM: &str = "default";

/// What `reset` does with the session-to-role table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetPolicy {
    /// Forget every assignment; sessions are re-seated in next-arrival order.
    #[default]
    ClearRoles,
    /// Keep existing assignments so the same two sessions play the next round.
    KeepRoles,
}

/// Configuration shared by every room of a registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base seed for eviction randomness. `None` seeds from the OS.
    /// Each room derives its own stream from this seed.
    pub seed: Option<u64>,

    /// Room used for an empty route.
    pub default_room: String,

    /// Role handling on reset.
    pub reset_policy: ResetPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            default_room: DEFAULT_ROOM.to_string(),
            reset_policy: ResetPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Use a fixed base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use a different fallback room name.
    #[must_use]
    pub fn with_default_room(mut self, room: impl Into<String>) -> Self {
        self.default_room = room.into();
        self
    }

    /// Choose what reset does with role assignments.
    #[must_use]
    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_room.is_empty() {
            return Err(ConfigError::EmptyDefaultRoom);
        }
        if self.default_room.contains('/') {
            return Err(ConfigError::InvalidDefaultRoom(self.default_room.clone()));
        }
        Ok(())
    }
}
