//! Core value types: symbols, board, session identity, RNG, configuration.
//!
//! Nothing in here knows about rooms or turn order; the engine builds on it.

pub mod symbol;
pub mod board;
pub mod session;
pub mod rng;
pub mod config;
pub mod error;

pub use symbol::{Cell, Role, Symbol};
pub use board::{Board, CELL_COUNT, LINES};
pub use session::SessionId;
pub use rng::{GameRng, StreamKind};
pub use config::{EngineConfig, ResetPolicy, DEFAULT_ROOM};
pub use error::{ConfigError, SnapshotError};
