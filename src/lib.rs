//! # tictoc
//!
//! Room-addressed tic-tac-toe with a bounded-piece rule: each player keeps
//! at most three marks on the board, and placing a fourth first removes one
//! of their own marks at random.
//!
//! ## Design Principles
//!
//! 1. **Pure engine**: `GameEngine` holds no locks, does no I/O, and knows
//!    no subscribers. Rule violations return `false`, never an error.
//!
//! 2. **Per-room serialization**: the `RoomRegistry` gives every room its
//!    own lock, so moves in one room never wait on another.
//!
//! 3. **Injectable randomness**: eviction goes through `EvictionSource`,
//!    seeded per room in production and scripted in tests.
//!
//! ## Modules
//!
//! - `core`: Symbols, board, session ids, RNG, configuration, errors
//! - `engine`: Game engine, piece inventories, eviction, snapshots
//! - `rooms`: Room ids and the registry that owns all engines
//! - `events`: Room-scoped change notifications
//! - `view`: Per-viewer rendering of a snapshot
//! - `table`: Serving layer tying viewers, rooms and events together

pub mod core;
pub mod engine;
pub mod rooms;
pub mod events;
pub mod view;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    Board, Cell, Role, Symbol, SessionId,
    GameRng, StreamKind, EngineConfig, ResetPolicy,
    ConfigError, SnapshotError,
};

pub use crate::engine::{
    GameEngine, GameStatus, MoveRecord, MoveRejection,
    EvictionSource, ScriptedEviction, Snapshot, MAX_PIECES,
};

pub use crate::rooms::{RoomHandle, RoomId, RoomRegistry};

pub use crate::events::{EventBus, LocalBus, RoomEvent, RoomEventKind};

pub use crate::view::{BoardView, CellView, StatusLine};

pub use crate::table::{GameTable, Viewer};
