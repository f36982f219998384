//! The per-room game engine.
//!
//! `GameEngine` is a plain state machine: no locking, no I/O, no
//! subscribers. The room registry serializes access and the serving layer
//! announces changes.

pub mod game;
pub mod inventory;
pub mod eviction;
pub mod snapshot;

pub use game::{GameEngine, GameStatus, MoveRecord, MoveRejection};
pub use inventory::{Inventories, PieceInventory, MAX_PIECES};
pub use eviction::{EvictionSource, ScriptedEviction};
pub use snapshot::Snapshot;
