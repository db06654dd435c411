//! Line-oriented text protocol spoken between players and the server.
//!
//! One command or notification per line. Inbound lines are parsed into
//! [`Command`]; outbound notifications are [`ServerMessage`]s rendered
//! through `Display`.

use derive_more::{Display, Error};
use std::str::FromStr;
use strictly_tictactoe::Mark;
use tracing::instrument;

/// A command sent by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `NAME <name>`: set the display name.
    Name(String),
    /// `Chat <text>`: relay text to both players.
    Chat(String),
    /// `Move <row>,<col>`: place the sender's mark.
    Move {
        /// Target row.
        row: usize,
        /// Target column.
        col: usize,
    },
    /// `RESTART`: ask for a new game once the current one ended.
    Restart,
}

/// Why an inbound line is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CommandError {
    /// The line was empty.
    #[display("Empty line")]
    Empty,

    /// The line does not start with a known command.
    #[display("Unknown command: {}", _0)]
    Unknown(#[error(not(source))] String),

    /// `Move` with missing or non-numeric coordinates.
    #[display("Malformed move: {}", _0)]
    MalformedMove(#[error(not(source))] String),
}

impl FromStr for Command {
    type Err = CommandError;

    #[instrument]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        if let Some(name) = line.strip_prefix("NAME ") {
            Ok(Command::Name(name.to_string()))
        } else if let Some(text) = line.strip_prefix("Chat ") {
            Ok(Command::Chat(text.to_string()))
        } else if let Some(args) = line.strip_prefix("Move ") {
            parse_coordinates(args)
                .map(|(row, col)| Command::Move { row, col })
                .ok_or_else(|| CommandError::MalformedMove(args.to_string()))
        } else if line == "RESTART" {
            Ok(Command::Restart)
        } else {
            Err(CommandError::Unknown(line.to_string()))
        }
    }
}

/// Parses `<row>,<col>`; range checking is left to the board.
fn parse_coordinates(args: &str) -> Option<(usize, usize)> {
    if args.contains(' ') {
        return None;
    }
    let (row, col) = args.split_once(',')?;
    Some((row.parse().ok()?, col.parse().ok()?))
}

/// Terminal message carried by `GAME_OVER`.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameOver {
    /// The named player completed a line.
    #[display("{} wins!", _0)]
    Won(String),
    /// Board filled with no line.
    #[display("Draw!")]
    Draw,
    /// The other side dropped mid-game.
    #[display("Opponent disconnected")]
    OpponentDisconnected,
}

/// A notification sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ServerMessage {
    /// Mark assignment at pairing time.
    #[display("You are {}", _0)]
    YouAre(Mark),
    /// The receiver may move now.
    #[display("Your turn")]
    YourTurn,
    /// The receiver must wait for the opponent.
    #[display("Opponent's turn")]
    OpponentsTurn,
    /// Echo of an accepted move.
    #[display("Move {mark} {row},{col}")]
    Move {
        /// Mark that was placed.
        mark: Mark,
        /// Row of the move.
        row: usize,
        /// Column of the move.
        col: usize,
    },
    /// Relayed player chat.
    #[display("Chat {name}: {text}")]
    Chat {
        /// Sender's display name.
        name: String,
        /// Chat text.
        text: String,
    },
    /// Informational server notice, rendered as chat from `System`.
    #[display("Chat System: {}", _0)]
    System(String),
    /// The game has ended.
    #[display("GAME_OVER {}", _0)]
    GameOver(GameOver),
    /// Board cleared after both players asked to restart.
    #[display("RESET_GAME")]
    ResetGame,
}

impl ServerMessage {
    /// Turn notice for the holder of `mark` when `turn` may move.
    pub fn turn_notice(mark: Mark, turn: Mark) -> Self {
        if mark == turn {
            ServerMessage::YourTurn
        } else {
            ServerMessage::OpponentsTurn
        }
    }
}
