//! The 3x3 board.
//!
//! Cells are addressed by a row-major index in `0..9`: index `i` sits at
//! row `i / 3`, column `i % 3`.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use super::symbol::{Cell, Symbol};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// The eight three-in-a-row lines: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Row-major 3x3 grid of cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// An empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Cell at `index`, or `None` when the index is off the board.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// `(row, column)` of a cell index.
    #[must_use]
    pub const fn row_col(index: usize) -> (usize, usize) {
        (index / 3, index % 3)
    }

    /// All cells in index order.
    #[must_use]
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// True when no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Indices currently holding `symbol`, ascending.
    pub fn indices_of(&self, symbol: Symbol) -> impl Iterator<Item = u8> + '_ {
        let target = Cell::from(symbol);
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| **cell == target)
            .map(|(idx, _)| idx as u8)
    }

    /// True when any line is filled entirely with `symbol`.
    #[must_use]
    pub fn has_line(&self, symbol: Symbol) -> bool {
        let target = Cell::from(symbol);
        LINES
            .iter()
            .any(|line| line.iter().all(|&idx| self.cells[idx] == target))
    }

    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    pub(crate) fn clear(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }
}

impl Index<usize> for Board {
    type Output = Cell;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..3 {
                match self.cells[row * 3 + col].symbol() {
                    Some(symbol) => write!(f, "{symbol}")?,
                    None => f.write_str("_")?,
                }
            }
        }
        Ok(())
    }
}
