//! Error types for the fallible, non-gameplay paths.
//!
//! Rule violations (occupied cell, wrong turn, finished game) are not errors:
//! the engine reports them as a `false` return.

use thiserror::Error;

/// Invalid engine configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("default room name must not be empty")]
    EmptyDefaultRoom,

    #[error("default room name must not contain '/': {0:?}")]
    InvalidDefaultRoom(String),
}

/// Failure encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),
}
