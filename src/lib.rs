//! Strictly Duel - two-player networked tic-tac-toe.
//!
//! Pairs two TCP connections into one game, arbitrates moves against a
//! shared board, detects wins and draws, and replays once both players ask
//! for a restart. Clients speak a newline-delimited text protocol.
//!
//! # Architecture
//!
//! - **Acceptor**: binds the listener and accepts players two at a time
//! - **SessionCoordinator**: pairs connections, assigns marks, runs the
//!   restart handshake
//! - **PlayerSession**: per-connection command interpreter
//! - **SharedSession**: the single lock around board, turn and seats
//!
//! # Example
//!
//! ```no_run
//! use strictly_duel::{Acceptor, ServerConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let acceptor = Acceptor::bind(&ServerConfig::default()).await?;
//! acceptor.run().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod codec;
mod config;
mod coordinator;
mod player;
mod protocol;
mod server;
mod session;
mod state;

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_PORT, ServerConfig};

// Crate-level exports - Wire protocol
pub use codec::CommandCodec;
pub use protocol::{Command, CommandError, GameOver, ServerMessage};

// Crate-level exports - Session state
pub use session::{Outbox, PlayerPhase, Seat, SessionId, SessionSnapshot, SharedSession, Table};
pub use state::{MoveRejection, MoveResult, SessionState};

// Crate-level exports - Players and pairing
pub use coordinator::{PairedSession, SessionCoordinator};
pub use player::{PlayerSession, spawn_writer};

// Crate-level exports - Transport
pub use client::{relay, run_client};
pub use server::{Acceptor, ServerError};

// Crate-level exports - Board types
pub use strictly_tictactoe::{Board, Cell, InvalidMove, Mark, Outcome};
