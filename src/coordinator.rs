//! Pairs two connections into one game and drives the restart handshake.

use crate::config::ServerConfig;
use crate::player::{PlayerSession, spawn_writer};
use crate::protocol::ServerMessage;
use crate::session::{PlayerPhase, Seat, SessionId, SharedSession};
use strictly_tictactoe::Mark;
use strum::IntoEnumIterator;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// What the restart watch should do after a wake-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchStep {
    /// Nothing to do yet.
    Wait,
    /// The board was reset and play resumed.
    Reset,
    /// A player left; the watch is over.
    Stop,
}

/// Builds paired sessions from accepted connections.
#[derive(Debug, Clone)]
pub struct SessionCoordinator {
    default_player_name: String,
    max_line_length: usize,
}

impl SessionCoordinator {
    /// Creates a coordinator using the naming and framing limits in `config`.
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            default_player_name: config.default_player_name().clone(),
            max_line_length: *config.max_line_length(),
        }
    }

    /// Pairs two connections: `first` plays X and moves first, `second` plays O.
    ///
    /// Both players are told their mark and whose turn it is before either
    /// connection is read, then one reader task per player and the restart
    /// watch are spawned. Must be called inside a Tokio runtime.
    #[instrument(skip_all)]
    pub fn pair<A, B>(&self, first: A, second: B) -> PairedSession
    where
        A: AsyncRead + AsyncWrite + Send + 'static,
        B: AsyncRead + AsyncWrite + Send + 'static,
    {
        let id = SessionId::next();
        let (x_read, x_write) = tokio::io::split(first);
        let (o_read, o_write) = tokio::io::split(second);
        let (x_tx, x_rx) = mpsc::unbounded_channel();
        let (o_tx, o_rx) = mpsc::unbounded_channel();

        let session = SharedSession::new(
            id,
            Seat::new(self.default_player_name.clone(), x_tx),
            Seat::new(self.default_player_name.clone(), o_tx),
        );

        let writers = [
            spawn_writer(x_write, x_rx, id, Mark::X),
            spawn_writer(o_write, o_rx, id, Mark::O),
        ];

        Self::begin(&session);

        let readers = [
            tokio::spawn(
                PlayerSession::new(session.clone(), Mark::X, x_read, self.max_line_length).run(),
            ),
            tokio::spawn(
                PlayerSession::new(session.clone(), Mark::O, o_read, self.max_line_length).run(),
            ),
        ];

        let watch = tokio::spawn(Self::watch_restarts(session.clone()));
        info!(session_id = %id, "Players paired");

        PairedSession {
            session,
            readers,
            writers,
            watch,
        }
    }

    /// Sends mark assignments and the opening turn notices.
    fn begin(session: &SharedSession) {
        let mut table = session.lock();
        for mark in Mark::iter() {
            table.send(mark, ServerMessage::YouAre(mark));
        }
        table.announce_turn();
        table.set_phase_all(PlayerPhase::InProgress);
    }

    /// Resets the game each time both players asked to restart; returns once
    /// either player disconnects.
    #[instrument(skip_all, fields(session_id = %session.id()))]
    async fn watch_restarts(session: SharedSession) {
        loop {
            session.woken().await;
            match Self::on_wake(&session) {
                WatchStep::Wait => debug!("Woken; restart handshake incomplete"),
                WatchStep::Reset => info!("Game reset; X to move"),
                WatchStep::Stop => {
                    info!("Player left; restart watch ending");
                    return;
                }
            }
        }
    }

    fn on_wake(session: &SharedSession) -> WatchStep {
        let mut table = session.lock();
        if table.any_disconnected() {
            return WatchStep::Stop;
        }
        if !table.state_mut().reset_for_restart() {
            return WatchStep::Wait;
        }
        table.broadcast(ServerMessage::ResetGame);
        table.announce_turn();
        table.set_phase_all(PlayerPhase::InProgress);
        WatchStep::Reset
    }
}

/// Handles to the tasks serving one paired game.
#[derive(Debug)]
pub struct PairedSession {
    session: SharedSession,
    readers: [JoinHandle<()>; 2],
    writers: [JoinHandle<()>; 2],
    watch: JoinHandle<()>,
}

impl PairedSession {
    /// Returns the shared session.
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Waits until both players disconnected and every task finished.
    pub async fn finished(self) {
        let handles = self
            .readers
            .into_iter()
            .chain(self.writers)
            .chain(std::iter::once(self.watch));
        for handle in handles {
            if let Err(e) = handle.await {
                debug!(error = %e, "Session task ended abnormally");
            }
        }
    }
}
