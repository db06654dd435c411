//! Result of evaluating the board after a move.

use super::Mark;

/// What a just-applied move did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// No line completed and empty cells remain.
    Continue,
    /// The mover completed a line.
    Win(Mark),
    /// The board is full with no completed line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win(mark) => Some(*mark),
            Outcome::Continue | Outcome::Draw => None,
        }
    }

    /// Returns true if the game is over.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Continue => write!(f, "Continue"),
            Outcome::Win(mark) => write!(f, "Player {} wins", mark),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
