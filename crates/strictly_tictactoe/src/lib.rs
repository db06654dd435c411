//! Pure tic-tac-toe board logic.
//!
//! A 3x3 grid of [`Cell`]s, the two [`Mark`]s that fill it, and the rules
//! that decide whether a move ended the game. Nothing in this crate performs
//! I/O or locking; callers serialize access themselves.
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{Board, Mark, Outcome};
//!
//! let mut board = Board::new();
//! board.apply(1, 1, Mark::X).unwrap();
//! assert_eq!(board.evaluate(1, 1, Mark::X), Outcome::Continue);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod outcome;
pub mod rules;
mod types;

pub use error::InvalidMove;
pub use outcome::Outcome;
pub use types::{BOARD_SIZE, Board, Cell, Mark};
