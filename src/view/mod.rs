//! What one viewer sees of a room.
//!
//! [`BoardView::render`] turns a snapshot and the viewer's role into cell
//! labels, clickability, a status line, and whether the reset control is
//! shown. Interactivity here is a usability aid only; the engine validates
//! every move again.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Role, Symbol, CELL_COUNT};
use crate::engine::{GameStatus, Snapshot};
use crate::rooms::RoomId;

/// One rendered cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CellView {
    /// `"X"`, `"O"`, or `""` for an empty cell.
    pub label: &'static str,
    /// True when clicking this cell could be a legal move for the viewer.
    pub interactive: bool,
}

/// Status line shown above the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusLine {
    Victory,
    Defeat { winner: Symbol },
    Spectating { to_move: Symbol },
    YourTurn,
    Waiting,
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusLine::Victory => f.write_str("You win!"),
            StatusLine::Defeat { winner } => write!(f, "Player {winner} wins."),
            StatusLine::Spectating { to_move } => write!(f, "Spectating, Player {to_move} to move"),
            StatusLine::YourTurn => f.write_str("Your turn"),
            StatusLine::Waiting => f.write_str("Waiting for opponent..."),
        }
    }
}

/// A viewer's full render of a room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub role: Role,
    pub cells: [CellView; CELL_COUNT],
    pub status: StatusLine,
    /// Reset control is offered to the X seat only.
    pub can_reset: bool,
}

impl BoardView {
    pub fn render(snapshot: &Snapshot, role: Role) -> Self {
        let status = status_line(snapshot, role);
        let my_turn = snapshot.winner.is_none() && role.symbol() == Some(snapshot.turn);
        let cells = render_cells(&snapshot.board, my_turn);

        Self {
            role,
            cells,
            status,
            can_reset: role == Role::X,
        }
    }

    /// Page title for a room.
    pub fn title(room: &RoomId) -> String {
        format!("Tic-Tac-Toe • Room {room}")
    }

    /// Line telling the viewer which seat they hold.
    pub fn banner(&self) -> String {
        format!("You are: {}", self.role)
    }

    /// Indices of the cells the viewer may click.
    pub fn interactive_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.interactive)
            .map(|(idx, _)| idx)
    }
}

fn render_cells(board: &Board, my_turn: bool) -> [CellView; CELL_COUNT] {
    std::array::from_fn(|idx| {
        let cell = board[idx];
        let label = match cell.symbol() {
            Some(Symbol::X) => "X",
            Some(Symbol::O) => "O",
            None => "",
        };
        CellView {
            label,
            interactive: my_turn && cell.is_empty(),
        }
    })
}

fn status_line(snapshot: &Snapshot, role: Role) -> StatusLine {
    match (snapshot.status(), role.symbol()) {
        (GameStatus::Finished(winner), Some(mine)) if winner == mine => StatusLine::Victory,
        (GameStatus::Finished(winner), _) => StatusLine::Defeat { winner },
        (GameStatus::InProgress, None) => StatusLine::Spectating {
            to_move: snapshot.turn,
        },
        (GameStatus::InProgress, Some(mine)) if mine == snapshot.turn => StatusLine::YourTurn,
        (GameStatus::InProgress, Some(_)) => StatusLine::Waiting,
    }
}
