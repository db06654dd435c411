//! The single serialization boundary shared by both players of a game.
//!
//! A [`SharedSession`] owns the [`SessionState`] and a seat registry keyed
//! by mark. Players never hold references to each other: the opponent is
//! whatever sits in the other seat, and a cleared seat means the opponent is
//! gone. Outbound notifications are queued while the lock is held, so each
//! connection sees them in the order the operations completed.

use crate::protocol::ServerMessage;
use crate::state::SessionState;
use derive_getters::Getters;
use derive_more::Display;
use derive_new::new;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strictly_tictactoe::Mark;
use tokio::sync::{Notify, mpsc};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a paired game.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display("session-{}", _0)]
pub struct SessionId(u64);

impl SessionId {
    /// Allocates the next process-wide id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Lifecycle of one player's seat.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerPhase {
    /// Paired, initial notices not sent yet.
    Assigned,
    /// Game running; moves are accepted on this seat's turn.
    InProgress,
    /// Game over; `RESTART` is accepted.
    Ended,
    /// Connection closed. Terminal.
    Disconnected,
}

/// Sending side of a connection's outbound queue.
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

/// A connected player as seen from inside the lock.
///
/// `Seat::new(name, outbox)` starts in [`PlayerPhase::Assigned`].
#[derive(Debug, Getters, new)]
pub struct Seat {
    /// Display name.
    name: String,
    /// Outbound queue feeding this player's writer task.
    #[getter(skip)]
    outbox: Outbox,
    /// Current phase.
    #[new(value = "PlayerPhase::Assigned")]
    phase: PlayerPhase,
}

/// Everything guarded by the session mutex.
#[derive(Debug)]
pub struct Table {
    id: SessionId,
    state: SessionState,
    seats: [Option<Seat>; 2],
}

impl Table {
    /// Returns the game state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the game state for mutation.
    pub fn state_mut(&mut self) -> &mut SessionState {
        &mut self.state
    }

    /// Returns the phase of `mark`'s seat; a cleared seat is `Disconnected`.
    pub fn phase(&self, mark: Mark) -> PlayerPhase {
        self.seat(mark)
            .map(|s| s.phase)
            .unwrap_or(PlayerPhase::Disconnected)
    }

    /// Sets the phase of `mark`'s seat if it is still occupied.
    pub fn set_phase(&mut self, mark: Mark, phase: PlayerPhase) {
        if let Some(seat) = self.seats[mark.index()].as_mut() {
            debug!(session_id = %self.id, %mark, from = %seat.phase, to = %phase, "Phase change");
            seat.phase = phase;
        }
    }

    /// Sets the phase of every occupied seat.
    pub fn set_phase_all(&mut self, phase: PlayerPhase) {
        self.set_phase(Mark::X, phase);
        self.set_phase(Mark::O, phase);
    }

    /// Returns the display name of `mark`'s seat.
    pub fn name(&self, mark: Mark) -> Option<&str> {
        self.seat(mark).map(|s| s.name.as_str())
    }

    /// Renames `mark`'s seat.
    pub fn set_name(&mut self, mark: Mark, name: String) {
        if let Some(seat) = self.seats[mark.index()].as_mut() {
            seat.name = name;
        }
    }

    /// Returns true while `mark`'s seat is occupied.
    pub fn is_seated(&self, mark: Mark) -> bool {
        self.seats[mark.index()].is_some()
    }

    /// Returns true once either seat has been cleared.
    pub fn any_disconnected(&self) -> bool {
        self.seats.iter().any(Option::is_none)
    }

    /// Clears `mark`'s seat, dropping its outbox. Returns the seat if present.
    pub fn vacate(&mut self, mark: Mark) -> Option<Seat> {
        self.seats[mark.index()].take()
    }

    /// Queues `message` for `mark`. A cleared seat drops it silently.
    pub fn send(&self, mark: Mark, message: ServerMessage) {
        let Some(seat) = self.seat(mark) else {
            debug!(session_id = %self.id, %mark, %message, "No seat; dropping message");
            return;
        };
        if seat.outbox.send(message).is_err() {
            warn!(session_id = %self.id, %mark, "Writer gone; message dropped");
        }
    }

    /// Queues `message` for both seats, X first.
    pub fn broadcast(&self, message: ServerMessage) {
        self.send(Mark::X, message.clone());
        self.send(Mark::O, message);
    }

    /// Tells each seat whether it holds the turn, X first.
    pub fn announce_turn(&self) {
        let turn = self.state.turn();
        self.send(Mark::X, ServerMessage::turn_notice(Mark::X, turn));
        self.send(Mark::O, ServerMessage::turn_notice(Mark::O, turn));
    }

    fn seat(&self, mark: Mark) -> Option<&Seat> {
        self.seats[mark.index()].as_ref()
    }
}

/// Point-in-time copy of a session, for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Game state at the time of the snapshot.
    pub state: SessionState,
    /// Seat phases, indexed by [`Mark::index`].
    pub phases: [PlayerPhase; 2],
    /// Display names, `None` for a cleared seat.
    pub names: [Option<String>; 2],
}

impl SessionSnapshot {
    /// Phase of `mark`'s seat.
    pub fn phase(&self, mark: Mark) -> PlayerPhase {
        self.phases[mark.index()]
    }

    /// Display name of `mark`'s seat.
    pub fn name(&self, mark: Mark) -> Option<&str> {
        self.names[mark.index()].as_deref()
    }
}

#[derive(Debug)]
struct Inner {
    id: SessionId,
    table: Mutex<Table>,
    wake: Notify,
}

/// Handle to one paired game; cheap to clone.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Inner>,
}

impl SharedSession {
    /// Creates a session with both seats filled, X in `x`, O in `o`.
    #[instrument(skip(x, o))]
    pub fn new(id: SessionId, x: Seat, o: Seat) -> Self {
        info!(session_id = %id, x = %x.name, o = %o.name, "Creating session");
        Self {
            inner: Arc::new(Inner {
                id,
                table: Mutex::new(Table {
                    id,
                    state: SessionState::new(),
                    seats: [Some(x), Some(o)],
                }),
                wake: Notify::new(),
            }),
        }
    }

    /// Returns the session id.
    pub fn id(&self) -> SessionId {
        self.inner.id
    }

    /// Enters the serialization boundary.
    ///
    /// The guard must not be held across an `.await`.
    pub fn lock(&self) -> MutexGuard<'_, Table> {
        self.inner
            .table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Wakes the coordinator's restart watch.
    pub fn wake(&self) {
        self.inner.wake.notify_one();
    }

    /// Waits for the next [`Self::wake`]. A wake sent while nobody waits is
    /// kept and returned immediately.
    pub async fn woken(&self) {
        self.inner.wake.notified().await;
    }

    /// Copies the current state out of the lock.
    pub fn snapshot(&self) -> SessionSnapshot {
        let table = self.lock();
        SessionSnapshot {
            state: table.state.clone(),
            phases: [table.phase(Mark::X), table.phase(Mark::O)],
            names: [
                table.name(Mark::X).map(str::to_string),
                table.name(Mark::O).map(str::to_string),
            ],
        }
    }
}
