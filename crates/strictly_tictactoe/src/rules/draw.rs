//! Draw detection logic for tic-tac-toe.

use crate::{Board, Cell};
use tracing::instrument;

/// Checks if the board is full (no empty cell left).
///
/// A full board whose last move completed no line is a draw.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board
        .cells()
        .iter()
        .flatten()
        .all(|cell| *cell != Cell::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mark;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_partial_board_not_full() {
        let mut board = Board::new();
        board.apply(1, 1, Mark::X).unwrap();
        assert!(!is_full(&board));
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for row in 0..3 {
            for col in 0..3 {
                board.apply(row, col, Mark::O).unwrap();
            }
        }
        assert!(is_full(&board));
    }
}
