//! Shared game state for one paired session.
//!
//! [`SessionState`] has no locking of its own. It lives inside the session
//! mutex (see [`SharedSession`](crate::SharedSession)) and every method is one
//! complete step under that lock.

use derive_more::{Display, Error, From};
use strictly_tictactoe::{Board, InvalidMove, Mark, Outcome};
use tracing::{debug, info, instrument};

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum MoveRejection {
    /// The game already ended; waiting for a restart.
    #[display("Game is already over")]
    #[from(ignore)]
    GameEnded,

    /// The other mark holds the turn.
    #[display("It's {}'s turn", _0)]
    #[from(ignore)]
    NotYourTurn(#[error(not(source))] Mark),

    /// The board refused the coordinates.
    #[display("Invalid move: {}", _0)]
    Invalid(InvalidMove),
}

/// Result of [`SessionState::try_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// The move was applied.
    Accepted(Outcome),
    /// Nothing changed.
    Rejected(MoveRejection),
}

/// Board, turn, end flag and restart intents for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    board: Board,
    turn: Mark,
    game_ended: bool,
    restart_requested: [bool; 2],
}

impl SessionState {
    /// Creates a fresh game with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Mark::X,
            game_ended: false,
            restart_requested: [false; 2],
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark allowed to move.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Returns true once a win, draw or disconnect ended the game.
    pub fn game_ended(&self) -> bool {
        self.game_ended
    }

    /// Returns whether `mark` asked for a restart.
    pub fn restart_requested(&self, mark: Mark) -> bool {
        self.restart_requested[mark.index()]
    }

    /// Applies a move by `mark` if the game is live and it holds the turn.
    ///
    /// On `Continue` the turn passes to the opponent; on `Win` or `Draw` the
    /// game ends and the turn stays put.
    #[instrument(skip(self))]
    pub fn try_move(&mut self, mark: Mark, row: usize, col: usize) -> MoveResult {
        if self.game_ended {
            return MoveResult::Rejected(MoveRejection::GameEnded);
        }
        if mark != self.turn {
            return MoveResult::Rejected(MoveRejection::NotYourTurn(self.turn));
        }
        if let Err(e) = self.board.apply(row, col, mark) {
            return MoveResult::Rejected(e.into());
        }

        let outcome = self.board.evaluate(row, col, mark);
        if outcome.is_terminal() {
            info!(%outcome, "Game ended");
            self.game_ended = true;
        } else {
            self.turn = mark.opponent();
        }
        debug!(board = %self.board.display(), "Move applied");

        MoveResult::Accepted(outcome)
    }

    /// Ends the game without a board outcome (opponent left).
    pub fn end_game(&mut self) {
        self.game_ended = true;
    }

    /// Records that `mark` wants to play again.
    ///
    /// Returns true when both marks have now asked.
    #[instrument(skip(self))]
    pub fn request_restart(&mut self, mark: Mark) -> bool {
        self.restart_requested[mark.index()] = true;
        self.restart_requested.iter().all(|r| *r)
    }

    /// Drops a pending restart intent for `mark`.
    pub fn withdraw_restart(&mut self, mark: Mark) {
        self.restart_requested[mark.index()] = false;
    }

    /// Returns true when a reset is allowed: the game ended and both asked.
    pub fn ready_for_restart(&self) -> bool {
        self.game_ended && self.restart_requested.iter().all(|r| *r)
    }

    /// Clears the board and flags and gives X the first move.
    ///
    /// Returns false and changes nothing unless [`Self::ready_for_restart`].
    #[instrument(skip(self))]
    pub fn reset_for_restart(&mut self) -> bool {
        if !self.ready_for_restart() {
            debug!("Reset refused; restart handshake incomplete");
            return false;
        }
        self.board.reset();
        self.game_ended = false;
        self.restart_requested = [false; 2];
        self.turn = Mark::X;
        true
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
