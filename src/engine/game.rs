//! The game engine for one room.
//!
//! ## Rules
//!
//! - X moves first; turns alternate after every accepted move.
//! - A move needs an unfinished game, an empty target cell, and the mover's
//!   role to match the turn, checked in that order.
//! - Each symbol keeps at most three pieces. Placing a fourth first evicts
//!   one of the mover's own pieces, chosen by the `EvictionSource`.
//! - Completing any row, column or diagonal wins; the game then rejects all
//!   moves until `reset`.
//!
//! Illegal moves are ordinary events, so they are reported as `false`
//! (or a `MoveRejection` via `try_move`) and leave the state untouched.

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace};

use super::eviction::EvictionSource;
use super::inventory::Inventories;
use super::snapshot::Snapshot;
use crate::core::{Board, Cell, GameRng, ResetPolicy, Role, SessionId, Symbol};

/// Whether the game still accepts moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Finished(Symbol),
}

/// Outcome of an accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Cell the new piece went to.
    pub placed: u8,
    pub by: Symbol,
    /// Cell cleared by the three-piece cap, if any.
    pub evicted: Option<u8>,
    /// True when this move completed a line.
    pub won: bool,
}

/// Why a move was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveRejection {
    #[error("game already won by {0}")]
    Finished(Symbol),

    #[error("cell {0} is off the board")]
    OutOfRange(usize),

    #[error("cell {0} is occupied")]
    Occupied(usize),

    #[error("spectators cannot move")]
    Spectator,

    #[error("it is {turn}'s turn, not {role}'s")]
    NotYourTurn { role: Symbol, turn: Symbol },
}

/// One room's game: board, inventories, turn, winner and seating.
pub struct GameEngine {
    board: Board,
    inventories: Inventories,
    turn: Symbol,
    winner: Option<Symbol>,
    roles: ImHashMap<SessionId, Role>,
    last_move: Option<MoveRecord>,
    reset_policy: ResetPolicy,
    eviction: Box<dyn EvictionSource>,
}

impl GameEngine {
    /// Fresh engine drawing eviction choices from `eviction`.
    pub fn new(eviction: impl EvictionSource + 'static) -> Self {
        Self::with_policy(eviction, ResetPolicy::default())
    }

    /// Fresh engine with an explicit reset policy.
    pub fn with_policy(eviction: impl EvictionSource + 'static, reset_policy: ResetPolicy) -> Self {
        Self {
            board: Board::new(),
            inventories: Inventories::new(),
            turn: Symbol::X,
            winner: None,
            roles: ImHashMap::new(),
            last_move: None,
            reset_policy,
            eviction: Box::new(eviction),
        }
    }

    // === Seating ===

    /// Role for `session`, assigning one on first sight.
    ///
    /// First distinct session gets X, second gets O, the rest spectate.
    /// Repeated calls for a seated session return the same role.
    pub fn assign_role(&mut self, session: &SessionId) -> Role {
        if let Some(role) = self.roles.get(session) {
            return *role;
        }

        let taken = |role: Role| self.roles.values().any(|r| *r == role);
        let role = if !taken(Role::X) {
            Role::X
        } else if !taken(Role::O) {
            Role::O
        } else {
            Role::Spectator
        };

        debug!(session = %session, role = %role, "Assigned role");
        self.roles.insert(session.clone(), role);
        role
    }

    /// Role already recorded for `session`, without assigning one.
    #[must_use]
    pub fn role_of(&self, session: &SessionId) -> Option<Role> {
        self.roles.get(session).copied()
    }

    // === Moves ===

    /// Apply a move for `role` at `index`. Returns `false` and changes
    /// nothing when the move is illegal.
    pub fn attempt_move(&mut self, role: Role, index: usize) -> bool {
        self.try_move(role, index).is_ok()
    }

    /// Like [`attempt_move`](Self::attempt_move), reporting what happened.
    pub fn try_move(&mut self, role: Role, index: usize) -> Result<MoveRecord, MoveRejection> {
        let mover = match self.check_move(role, index) {
            Ok(mover) => mover,
            Err(rejection) => {
                trace!(role = %role, index, %rejection, "Rejected move");
                return Err(rejection);
            }
        };

        let evicted = self.evict_if_full(mover);

        self.board.set(index, Cell::from(mover));
        self.inventories.get_mut(mover).push(index as u8);

        let won = self.check_win(mover);
        if won {
            self.winner = Some(mover);
            info!(winner = %mover, "Game won");
        } else {
            self.turn = mover.other();
        }

        let record = MoveRecord {
            placed: index as u8,
            by: mover,
            evicted,
            won,
        };
        debug!(by = %mover, index, ?evicted, "Applied move");
        self.last_move = Some(record);
        Ok(record)
    }

    /// Preconditions in rule order: finished, cell, turn.
    fn check_move(&self, role: Role, index: usize) -> Result<Symbol, MoveRejection> {
        if let Some(winner) = self.winner {
            return Err(MoveRejection::Finished(winner));
        }
        match self.board.get(index) {
            None => return Err(MoveRejection::OutOfRange(index)),
            Some(cell) if !cell.is_empty() => return Err(MoveRejection::Occupied(index)),
            Some(_) => {}
        }
        let mover = role.symbol().ok_or(MoveRejection::Spectator)?;
        if mover != self.turn {
            return Err(MoveRejection::NotYourTurn {
                role: mover,
                turn: self.turn,
            });
        }
        Ok(mover)
    }

    /// Remove one of `mover`'s pieces if placing another would exceed the cap.
    fn evict_if_full(&mut self, mover: Symbol) -> Option<u8> {
        let inventory = self.inventories.get(mover);
        if !inventory.is_full() {
            return None;
        }

        let last = inventory.len() - 1;
        let position = self.eviction.pick(inventory.as_slice()).min(last);
        let cell = self.inventories.get_mut(mover).remove_at(position);
        self.board.set(cell as usize, Cell::Empty);
        debug!(by = %mover, cell, "Evicted piece");
        Some(cell)
    }

    /// True when `symbol` fills any of the eight lines.
    #[must_use]
    pub fn check_win(&self, symbol: Symbol) -> bool {
        self.board.has_line(symbol)
    }

    // === Reset ===

    /// Return to the initial state: empty board, no pieces, X to move, no
    /// winner. Role assignments are cleared or kept per the reset policy.
    pub fn reset(&mut self) {
        self.board.clear();
        self.inventories.clear();
        self.turn = Symbol::X;
        self.winner = None;
        self.last_move = None;
        if self.reset_policy == ResetPolicy::ClearRoles {
            self.roles = ImHashMap::new();
        }
        info!(policy = ?self.reset_policy, "Game reset");
    }

    // === Queries ===

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            turn: self.turn,
            winner: self.winner,
            roles: self.roles.clone(),
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        match self.winner {
            Some(symbol) => GameStatus::Finished(symbol),
            None => GameStatus::InProgress,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn turn(&self) -> Symbol {
        self.turn
    }

    #[must_use]
    pub fn winner(&self) -> Option<Symbol> {
        self.winner
    }

    /// Cells held by `symbol`, oldest first.
    #[must_use]
    pub fn pieces(&self, symbol: Symbol) -> &[u8] {
        self.inventories[symbol].as_slice()
    }

    #[must_use]
    pub fn last_move(&self) -> Option<MoveRecord> {
        self.last_move
    }

    #[must_use]
    pub fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameRng::from_entropy())
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("board", &self.board)
            .field("inventories", &self.inventories)
            .field("turn", &self.turn)
            .field("winner", &self.winner)
            .field("roles", &self.roles.len())
            .field("reset_policy", &self.reset_policy)
            .finish_non_exhaustive()
    }
}
