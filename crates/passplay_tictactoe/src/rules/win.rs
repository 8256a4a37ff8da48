//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three cells that win the game when they all hold the same mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine([Position; 3]);

impl WinLine {
    /// Creates a line from three positions.
    pub const fn new(cells: [Position; 3]) -> Self {
        Self(cells)
    }

    /// The three positions of the line.
    pub fn cells(&self) -> [Position; 3] {
        self.0
    }

    /// The three board indices of the line.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }

    /// Whether the line passes through a position.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }

    /// The player holding all three cells, if any.
    pub fn holder(&self, board: &Board) -> Option<Player> {
        let [a, b, c] = self.0;
        match board.get(a) {
            Square::Occupied(player)
                if board.get(b) == Square::Occupied(player)
                    && board.get(c) == Square::Occupied(player) =>
            {
                Some(player)
            }
            _ => None,
        }
    }
}

/// The eight winning lines: rows, then columns, then diagonals.
pub const WIN_LINES: [WinLine; 8] = {
    use Position::*;
    [
        // Rows
        WinLine::new([TopLeft, TopCenter, TopRight]),
        WinLine::new([MiddleLeft, Center, MiddleRight]),
        WinLine::new([BottomLeft, BottomCenter, BottomRight]),
        // Columns
        WinLine::new([TopLeft, MiddleLeft, BottomLeft]),
        WinLine::new([TopCenter, Center, BottomCenter]),
        WinLine::new([TopRight, MiddleRight, BottomRight]),
        // Diagonals
        WinLine::new([TopLeft, Center, BottomRight]),
        WinLine::new([TopRight, Center, BottomLeft]),
    ]
};

/// Finds the first completed line in [`WIN_LINES`] order.
///
/// When several lines hold at once, the earliest in enumeration order is
/// the one reported.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Player, WinLine)> {
    WIN_LINES
        .iter()
        .find_map(|line| line.holder(board).map(|player| (player, *line)))
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row,
/// `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    winning_line(board).map(|(player, _)| player)
}
