//! Per-symbol piece inventories.
//!
//! An inventory lists the board indices a symbol occupies, oldest first.
//! The engine mutates inventories and the board together so that
//! `inventory[s]` always equals the set of cells holding `s`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::Index;

use crate::core::Symbol;

/// Maximum live pieces per symbol.
pub const MAX_PIECES: usize = 3;

/// Board indices held by one symbol, in placement order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceInventory {
    cells: SmallVec<[u8; MAX_PIECES]>,
}

impl PieceInventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when placing another piece requires an eviction.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.len() >= MAX_PIECES
    }

    #[must_use]
    pub fn contains(&self, index: u8) -> bool {
        self.cells.contains(&index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    pub(crate) fn push(&mut self, index: u8) {
        debug_assert!(!self.is_full(), "inventory already holds {MAX_PIECES} pieces");
        self.cells.push(index);
    }

    /// Remove the piece at `position` within the inventory, returning its cell.
    pub(crate) fn remove_at(&mut self, position: usize) -> u8 {
        self.cells.remove(position)
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }
}

/// One inventory per symbol, indexable by `Symbol`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inventories {
    by_symbol: [PieceInventory; 2],
}

impl Inventories {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, symbol: Symbol) -> &PieceInventory {
        &self.by_symbol[symbol.index()]
    }

    pub(crate) fn get_mut(&mut self, symbol: Symbol) -> &mut PieceInventory {
        &mut self.by_symbol[symbol.index()]
    }

    pub(crate) fn clear(&mut self) {
        for inventory in &mut self.by_symbol {
            inventory.clear();
        }
    }
}

impl Index<Symbol> for Inventories {
    type Output = PieceInventory;

    fn index(&self, symbol: Symbol) -> &Self::Output {
        self.get(symbol)
    }
}
