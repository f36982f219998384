//! Read-only view of one room's engine for rendering.
//!
//! The role table is an `im::HashMap`, so taking a snapshot is O(1) no
//! matter how many sessions a room has seen. On the wire the table is a
//! sorted list so equal snapshots always encode to equal bytes.

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};

use super::game::GameStatus;
use crate::core::{Board, Role, SessionId, SnapshotError, Symbol};

/// Point-in-time copy of a room's observable state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireSnapshot", from = "WireSnapshot")]
pub struct Snapshot {
    pub board: Board,
    /// Symbol to move. Meaningless once `winner` is set.
    pub turn: Symbol,
    pub winner: Option<Symbol>,
    pub roles: ImHashMap<SessionId, Role>,
}

impl Snapshot {
    /// Role recorded for `session`, if it has been seen.
    #[must_use]
    pub fn role_of(&self, session: &SessionId) -> Option<Role> {
        self.roles.get(session).copied()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        match self.winner {
            Some(symbol) => GameStatus::Finished(symbol),
            None => GameStatus::InProgress,
        }
    }

    /// Encode with bincode for shipping to a remote viewer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by [`Snapshot::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[derive(Serialize, Deserialize)]
struct WireSnapshot {
    board: Board,
    turn: Symbol,
    winner: Option<Symbol>,
    roles: Vec<(SessionId, Role)>,
}

impl From<Snapshot> for WireSnapshot {
    fn from(snapshot: Snapshot) -> Self {
        let mut roles: Vec<_> = snapshot.roles.into_iter().collect();
        roles.sort_by(|a, b| a.0.cmp(&b.0));
        Self {
            board: snapshot.board,
            turn: snapshot.turn,
            winner: snapshot.winner,
            roles,
        }
    }
}

impl From<WireSnapshot> for Snapshot {
    fn from(wire: WireSnapshot) -> Self {
        Self {
            board: wire.board,
            turn: wire.turn,
            winner: wire.winner,
            roles: wire.roles.into_iter().collect(),
        }
    }
}
