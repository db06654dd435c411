//! Per-connection command interpreter.
//!
//! Each connected player gets a [`PlayerSession`] that reads lines from its
//! half of the connection and turns them into operations on the
//! [`SharedSession`]. Lines that do not parse as a command and commands that
//! arrive in the wrong phase are dropped without a reply.

use crate::codec::CommandCodec;
use crate::protocol::{Command, GameOver, ServerMessage};
use crate::session::{PlayerPhase, SessionId, SharedSession};
use crate::state::MoveResult;
use futures::{SinkExt, StreamExt};
use strictly_tictactoe::{Mark, Outcome};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, info, instrument, warn};

const WAITING_FOR_OPPONENT: &str = "Waiting for opponent to restart...";
const BOTH_READY: &str = "Both players ready. Starting new game...";

/// One connected player.
pub struct PlayerSession<R> {
    session: SharedSession,
    mark: Mark,
    lines: FramedRead<R, CommandCodec>,
}

impl<R> PlayerSession<R>
where
    R: AsyncRead + Unpin,
{
    /// Wraps the read half of a connection.
    pub fn new(session: SharedSession, mark: Mark, reader: R, max_line_length: usize) -> Self {
        Self {
            session,
            mark,
            lines: FramedRead::new(reader, CommandCodec::new(max_line_length)),
        }
    }

    /// Returns this player's mark.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Reads commands until the connection closes, then disconnects.
    #[instrument(skip(self), fields(session_id = %self.session.id(), mark = %self.mark))]
    pub async fn run(mut self) {
        loop {
            match self.lines.next().await {
                Some(Ok(line)) => self.handle_line(&line),
                Some(Err(e)) => {
                    warn!(error = %e, "Connection lost");
                    break;
                }
                None => {
                    info!("Connection closed by peer");
                    break;
                }
            }
        }
        self.disconnect();
    }

    /// Parses and applies one inbound line.
    pub fn handle_line(&self, line: &str) {
        match line.parse::<Command>() {
            Ok(command) => self.handle(command),
            Err(e) => debug!(error = %e, "Ignoring line"),
        }
    }

    /// Applies one command.
    pub fn handle(&self, command: Command) {
        debug!(?command, "Handling command");
        match command {
            Command::Name(name) => self.rename(name),
            Command::Chat(text) => self.chat(text),
            Command::Move { row, col } => self.play(row, col),
            Command::Restart => self.request_restart(),
        }
    }

    fn rename(&self, name: String) {
        info!(%name, "{} joined as Player {}", name, self.mark);
        self.session.lock().set_name(self.mark, name);
    }

    fn chat(&self, text: String) {
        let table = self.session.lock();
        let name = table.name(self.mark).unwrap_or_default().to_string();
        let message = ServerMessage::Chat { name, text };
        table.send(self.mark, message.clone());
        table.send(self.mark.opponent(), message);
    }

    #[instrument(skip(self))]
    fn play(&self, row: usize, col: usize) {
        let mut table = self.session.lock();

        let phase = table.phase(self.mark);
        if phase != PlayerPhase::InProgress {
            debug!(%phase, "Move outside a running game ignored");
            return;
        }
        if !table.is_seated(self.mark.opponent()) {
            debug!("Move without an opponent ignored");
            return;
        }

        let outcome = match table.state_mut().try_move(self.mark, row, col) {
            MoveResult::Accepted(outcome) => outcome,
            MoveResult::Rejected(reason) => {
                debug!(%reason, "Move rejected");
                return;
            }
        };

        table.broadcast(ServerMessage::Move {
            mark: self.mark,
            row,
            col,
        });

        match outcome {
            Outcome::Win(_) => {
                let name = table.name(self.mark).unwrap_or_default().to_string();
                info!(winner = %name, "Game won");
                table.broadcast(ServerMessage::GameOver(GameOver::Won(name)));
                table.set_phase_all(PlayerPhase::Ended);
            }
            Outcome::Draw => {
                info!("Game drawn");
                table.broadcast(ServerMessage::GameOver(GameOver::Draw));
                table.set_phase_all(PlayerPhase::Ended);
            }
            Outcome::Continue => table.announce_turn(),
        }
    }

    #[instrument(skip(self))]
    fn request_restart(&self) {
        let mut table = self.session.lock();

        let phase = table.phase(self.mark);
        if phase != PlayerPhase::Ended {
            debug!(%phase, "Restart outside an ended game ignored");
            return;
        }

        let both_ready = table.state_mut().request_restart(self.mark);
        let name = table.name(self.mark).unwrap_or_default().to_string();
        let opponent = self.mark.opponent();

        table.send(self.mark, ServerMessage::System(WAITING_FOR_OPPONENT.to_string()));
        if table.is_seated(opponent) {
            table.send(
                opponent,
                ServerMessage::System(format!("{} wants to restart the game.", name)),
            );
            if both_ready {
                table.broadcast(ServerMessage::System(BOTH_READY.to_string()));
            }
        }
        drop(table);

        if both_ready {
            debug!("Restart handshake complete");
            self.session.wake();
        }
    }

    /// Vacates this player's seat and ends the opponent's game if it was live.
    #[instrument(skip(self), fields(session_id = %self.session.id(), mark = %self.mark))]
    fn disconnect(&self) {
        let mut table = self.session.lock();
        let opponent = self.mark.opponent();

        if let Some(seat) = table.vacate(self.mark) {
            debug!(?seat, "Seat vacated");
        }
        table.state_mut().withdraw_restart(self.mark);

        if table.is_seated(opponent) && !table.state().game_ended() {
            info!("Player left mid-game; ending opponent's game");
            table.send(opponent, ServerMessage::GameOver(GameOver::OpponentDisconnected));
            table.state_mut().end_game();
            table.set_phase(opponent, PlayerPhase::Ended);
        }
        drop(table);

        self.session.wake();
    }
}

/// Spawns the task that writes `outbox` to `writer`, one line per message.
///
/// The task ends when every sender is dropped (the seat was vacated) or a
/// write fails; the write half is shut down on the way out.
pub fn spawn_writer<W>(
    writer: W,
    mut outbox: mpsc::UnboundedReceiver<ServerMessage>,
    session_id: SessionId,
    mark: Mark,
) -> JoinHandle<()>
where
    W: AsyncWrite + Send + Unpin + 'static,
{
    tokio::spawn(async move {
        let mut framed = FramedWrite::new(writer, LinesCodec::new());
        while let Some(message) = outbox.recv().await {
            debug!(%session_id, %mark, %message, "Sending");
            if let Err(e) = framed.send(message.to_string()).await {
                warn!(%session_id, %mark, error = %e, "Write failed");
                return;
            }
        }
        if let Err(e) = SinkExt::<String>::close(&mut framed).await {
            debug!(%session_id, %mark, error = %e, "Close failed");
        }
    })
}
