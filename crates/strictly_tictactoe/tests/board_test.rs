//! Tests for board mutation and outcome evaluation.

use strictly_tictactoe::{Board, Cell, InvalidMove, Mark, Outcome};
use strum::IntoEnumIterator;

const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[test]
fn test_apply_sets_empty_cell() {
    let mut board = Board::new();
    assert_eq!(board.apply(2, 1, Mark::O), Ok(()));
    assert_eq!(board.get(2, 1), Some(Cell::O));
}

#[test]
fn test_apply_never_overwrites() {
    let mut board = Board::new();
    board.apply(0, 0, Mark::X).unwrap();
    let before = board.clone();

    assert_eq!(
        board.apply(0, 0, Mark::O),
        Err(InvalidMove::Occupied { row: 0, col: 0 })
    );
    assert_eq!(board, before);
}

#[test]
fn test_apply_out_of_bounds() {
    let mut board = Board::new();
    assert_eq!(
        board.apply(3, 0, Mark::X),
        Err(InvalidMove::OutOfBounds { row: 3, col: 0 })
    );
    assert_eq!(
        board.apply(0, 7, Mark::X),
        Err(InvalidMove::OutOfBounds { row: 0, col: 7 })
    );
    assert_eq!(board, Board::new());
}

#[test]
fn test_every_line_wins_for_either_mark() {
    for mark in Mark::iter() {
        for line in LINES {
            let mut board = Board::new();
            for (r, c) in line {
                board.apply(r, c, mark).unwrap();
            }
            let (r, c) = line[2];
            assert_eq!(board.evaluate(r, c, mark), Outcome::Win(mark), "line {line:?}");
        }
    }
}

#[test]
fn test_full_board_without_line_is_draw() {
    // X O X
    // X O O
    // O X X
    let layout = [
        (0, 0, Mark::X),
        (0, 1, Mark::O),
        (0, 2, Mark::X),
        (1, 0, Mark::X),
        (1, 1, Mark::O),
        (1, 2, Mark::O),
        (2, 0, Mark::O),
        (2, 1, Mark::X),
        (2, 2, Mark::X),
    ];
    let mut board = Board::new();
    for (r, c, m) in layout {
        board.apply(r, c, m).unwrap();
    }
    assert_eq!(board.evaluate(2, 2, Mark::X), Outcome::Draw);
}

#[test]
fn test_partial_board_without_line_continues() {
    let mut board = Board::new();
    board.apply(0, 0, Mark::X).unwrap();
    board.apply(1, 1, Mark::O).unwrap();
    board.apply(2, 1, Mark::X).unwrap();
    assert_eq!(board.evaluate(2, 1, Mark::X), Outcome::Continue);
}

#[test]
fn test_evaluate_off_board_position_does_not_panic() {
    let mut board = Board::new();
    board.apply(0, 0, Mark::X).unwrap();
    assert_eq!(
        board.evaluate(usize::MAX, usize::MAX, Mark::X),
        Outcome::Continue
    );
}

#[test]
fn test_diagonal_detected_only_by_move_on_it() {
    let mut board = Board::new();
    board.apply(0, 0, Mark::X).unwrap();
    board.apply(2, 2, Mark::X).unwrap();
    board.apply(0, 1, Mark::X).unwrap();
    assert_eq!(board.evaluate(0, 1, Mark::X), Outcome::Continue);

    board.apply(1, 1, Mark::X).unwrap();
    assert_eq!(board.evaluate(1, 1, Mark::X), Outcome::Win(Mark::X));
}

#[test]
fn test_reset_clears_board() {
    let mut board = Board::new();
    board.apply(1, 2, Mark::O).unwrap();
    board.reset();
    assert!(board.cells().iter().flatten().all(|c| *c == Cell::Empty));
    assert_eq!(board.apply(1, 2, Mark::X), Ok(()));
}

#[test]
fn test_display() {
    let mut board = Board::new();
    board.apply(0, 0, Mark::X).unwrap();
    board.apply(1, 1, Mark::O).unwrap();
    assert_eq!(board.display(), "X|.|.\n-+-+-\n.|O|.\n-+-+-\n.|.|.");
}

#[test]
fn test_mark_opponent_and_index() {
    assert_eq!(Mark::X.opponent(), Mark::O);
    assert_eq!(Mark::O.opponent(), Mark::X);
    assert_eq!(Mark::X.index(), 0);
    assert_eq!(Mark::O.index(), 1);
    assert_eq!(Mark::X.to_string(), "X");
}
