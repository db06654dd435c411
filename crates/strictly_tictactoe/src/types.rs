//! Core domain types for tic-tac-toe.

use super::{InvalidMove, Outcome, rules};
use derive_more::Display;
use tracing::instrument;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// One of the two symbols a player places.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Mark {
    /// Player X (moves first).
    X,
    /// Player O (moves second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Stable index (X = 0, O = 1) for per-mark tables.
    pub fn index(self) -> usize {
        match self {
            Mark::X => 0,
            Mark::O => 1,
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Holds an X.
    X,
    /// Holds an O.
    O,
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// A cell moves from [`Cell::Empty`] to a mark exactly once; only
/// [`Board::reset`] clears it again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    /// Cells indexed as `cells[row][col]`.
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cell at `row`,`col`, or `None` off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Returns all cells, row-major.
    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Places `mark` at `row`,`col`.
    ///
    /// # Errors
    ///
    /// [`InvalidMove::OutOfBounds`] when either coordinate is outside
    /// `0..3`, [`InvalidMove::Occupied`] when the cell is not empty. The
    /// board is untouched on error.
    #[instrument(skip(self))]
    pub fn apply(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), InvalidMove> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(InvalidMove::OutOfBounds { row, col })?;

        if *cell != Cell::Empty {
            return Err(InvalidMove::Occupied { row, col });
        }

        *cell = Cell::from(mark);
        Ok(())
    }

    /// Evaluates the board after `mark` was placed at `last_row`,`last_col`.
    ///
    /// Only lines through the last move are checked for a win, so a diagonal
    /// is considered only when the move lies on it.
    #[instrument(skip(self), ret)]
    pub fn evaluate(&self, last_row: usize, last_col: usize, mark: Mark) -> Outcome {
        if rules::completes_line(self, last_row, last_col, mark) {
            Outcome::Win(mark)
        } else if rules::is_full(self) {
            Outcome::Draw
        } else {
            Outcome::Continue
        }
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells = Default::default();
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for (r, row) in self.cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                result.push(match cell {
                    Cell::Empty => '.',
                    Cell::X => 'X',
                    Cell::O => 'O',
                });
                if c + 1 < BOARD_SIZE {
                    result.push('|');
                }
            }
            if r + 1 < BOARD_SIZE {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}
