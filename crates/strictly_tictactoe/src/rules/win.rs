//! Win detection logic for tic-tac-toe.

use crate::{BOARD_SIZE, Board, Cell, Mark};
use tracing::instrument;

/// Checks whether the move at `row`,`col` gave `mark` three in a row.
///
/// Checked in order: the move's row, its column, the main diagonal when
/// `row == col`, the anti-diagonal when `row + col == 2`. Lines that do not
/// pass through the move are never inspected. A position off the board
/// completes nothing.
#[instrument(skip(board))]
pub fn completes_line(board: &Board, row: usize, col: usize, mark: Mark) -> bool {
    if row >= BOARD_SIZE || col >= BOARD_SIZE {
        return false;
    }

    let target = Cell::from(mark);
    let owned = |r: usize, c: usize| board.get(r, c) == Some(target);

    if (0..BOARD_SIZE).all(|c| owned(row, c)) {
        return true;
    }

    if (0..BOARD_SIZE).all(|r| owned(r, col)) {
        return true;
    }

    if row == col && (0..BOARD_SIZE).all(|i| owned(i, i)) {
        return true;
    }

    row + col == BOARD_SIZE - 1 && (0..BOARD_SIZE).all(|i| owned(i, BOARD_SIZE - 1 - i))
}
