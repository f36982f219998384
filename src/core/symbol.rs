//! Marks, cells and viewer roles.

use serde::{Deserialize, Serialize};

/// A player's mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// Both symbols, in turn order.
    pub const ALL: [Symbol; 2] = [Symbol::X, Symbol::O];

    /// The opponent's symbol.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    /// Dense index (X = 0, O = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Symbol::X => 0,
            Symbol::O => 1,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::X => f.write_str("X"),
            Symbol::O => f.write_str("O"),
        }
    }
}

/// Contents of one board square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// The symbol occupying this cell, if any.
    #[must_use]
    pub const fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Symbol::X),
            Cell::O => Some(Symbol::O),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Symbol> for Cell {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Cell::X,
            Symbol::O => Cell::O,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.symbol() {
            Some(symbol) => symbol.fmt(f),
            None => Ok(()),
        }
    }
}

/// A viewer's participation level in a room.
///
/// Only `X` and `O` ever hold turn rights; a `Spectator` watches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    X,
    O,
    Spectator,
}

impl Role {
    /// The symbol this role plays, or `None` for spectators.
    #[must_use]
    pub const fn symbol(self) -> Option<Symbol> {
        match self {
            Role::X => Some(Symbol::X),
            Role::O => Some(Symbol::O),
            Role::Spectator => None,
        }
    }

    #[must_use]
    pub const fn is_spectator(self) -> bool {
        matches!(self, Role::Spectator)
    }
}

impl From<Symbol> for Role {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::X => Role::X,
            Symbol::O => Role::O,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.symbol() {
            Some(symbol) => symbol.fmt(f),
            None => f.write_str("Spectator"),
        }
    }
}
