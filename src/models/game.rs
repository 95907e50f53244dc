//! Game state model - the application layer between gestures, the session
//! and the remote authority.
//!
//! A move goes through:
//! `Idle -> AwaitingConfirmation -> AwaitingStatus -> Idle`.
//! Only one move is in flight at a time; anything the authority does not
//! confirm is reverted, which here means the session was never touched.

use std::time::{Duration, Instant};

use shakmaty::Square;
use tracing::{debug, info, warn};

use crate::domain::notation::{GesturePolicy, MoveDescriptor};
use crate::domain::perspective::to_canonical;
use crate::domain::protocol::{GameStatus, MoveConfirmation};
use crate::domain::session::GameSession;
use crate::error::{MoveError, TransportError};
use crate::models::link::{AuthorityLink, LinkEvent, LinkRequest, Ticket};

/// Where the current move is in its round trip
#[derive(Debug)]
enum MoveState {
    Idle,
    AwaitingConfirmation {
        pending: MoveDescriptor,
        ticket: Ticket,
    },
    AwaitingStatus {
        notation: String,
        ticket: Ticket,
    },
}

/// Why a submitted move was put back
#[derive(Debug, thiserror::Error)]
pub enum RevertReason {
    #[error("the authority rejected the move")]
    Rejected,

    #[error("no answer from the authority")]
    TimedOut,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Something the presentation layer should react to
#[derive(Debug)]
pub enum ModelUpdate {
    /// The move was confirmed and is now on the board
    Applied { notation: String },
    /// The move never happened; the piece goes back to its origin
    Reverted {
        pending: MoveDescriptor,
        reason: RevertReason,
    },
    /// Status arrived; caption and result are up to date
    StatusResolved(GameStatus),
    /// Status could not be fetched; caption left as it was
    StatusUnavailable,
}

/// The main game model: one session plus its link to the authority
pub struct GameModel {
    session: GameSession,
    link: AuthorityLink,
    state: MoveState,
    policy: GesturePolicy,
    /// Updates produced outside of event handling, handed out on next poll
    queued: Vec<ModelUpdate>,
}

impl GameModel {
    /// Wrap a session. A fresh (not resumed) session announces a new game.
    pub fn new(session: GameSession, link: AuthorityLink, policy: GesturePolicy) -> Self {
        if !session.is_resumed {
            if let Err(e) = link.send(LinkRequest::NewGame) {
                warn!("could not announce new game: {}", e);
            }
        }
        Self {
            session,
            link,
            state: MoveState::Idle,
            policy,
            queued: Vec::new(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Whether a move is still waiting on the authority
    pub fn is_busy(&self) -> bool {
        !matches!(self.state, MoveState::Idle)
    }

    /// Submit a gesture given in physical squares (as the local player sees
    /// the board). Returns the notation sent to the authority.
    pub fn submit_gesture(&mut self, from: Square, to: Square) -> Result<String, MoveError> {
        if self.is_busy() {
            return Err(MoveError::MoveInFlight);
        }

        let color = self.session.color;
        let pending = self.session.prepare_move(
            to_canonical(from, color),
            to_canonical(to, color),
            self.policy,
        )?;
        let notation = pending.notation.clone();
        let ticket = self.link.issue_ticket();

        let request = LinkRequest::SubmitMove {
            ticket,
            notation: notation.clone(),
        };
        match self.link.send(request) {
            Ok(()) => {
                debug!("submitted {} (ticket {})", notation, ticket);
                self.state = MoveState::AwaitingConfirmation { pending, ticket };
            }
            Err(e) => {
                warn!("could not submit {}: {}", notation, e);
                self.queued.push(ModelUpdate::Reverted {
                    pending,
                    reason: e.into(),
                });
            }
        }
        Ok(notation)
    }

    /// Apply whatever the authority has finished so far, without blocking
    pub fn poll(&mut self) -> Vec<ModelUpdate> {
        let mut updates = std::mem::take(&mut self.queued);
        while let Some(event) = self.link.try_recv() {
            self.handle_event(event, &mut updates);
        }
        updates
    }

    /// Block until the in-flight move (and its status) resolve or `timeout`
    /// passes. On timeout the move is reverted, or the status given up on.
    pub fn wait(&mut self, timeout: Duration) -> Vec<ModelUpdate> {
        let deadline = Instant::now() + timeout;
        let mut updates = std::mem::take(&mut self.queued);

        while self.is_busy() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.link.recv_timeout(remaining) {
                Ok(Some(event)) => self.handle_event(event, &mut updates),
                Ok(None) => {
                    self.abandon(RevertReason::TimedOut, &mut updates);
                }
                Err(e) => {
                    self.abandon(RevertReason::Transport(e), &mut updates);
                }
            }
        }

        while let Some(event) = self.link.try_recv() {
            self.handle_event(event, &mut updates);
        }
        updates
    }

    /// Give up on the in-flight request; its ticket goes stale
    fn abandon(&mut self, reason: RevertReason, updates: &mut Vec<ModelUpdate>) {
        match std::mem::replace(&mut self.state, MoveState::Idle) {
            MoveState::AwaitingConfirmation { pending, .. } => {
                warn!("reverting {}: {}", pending.notation, reason);
                updates.push(ModelUpdate::Reverted { pending, reason });
            }
            MoveState::AwaitingStatus { notation, .. } => {
                warn!("no status after {}: {}", notation, reason);
                updates.push(ModelUpdate::StatusUnavailable);
            }
            MoveState::Idle => {}
        }
    }

    fn handle_event(&mut self, event: LinkEvent, updates: &mut Vec<ModelUpdate>) {
        match event {
            LinkEvent::NewGame(Ok(())) => info!("authority started a new game"),
            LinkEvent::NewGame(Err(e)) => warn!("new game request failed: {}", e),
            LinkEvent::Move { ticket, result } => self.on_move(ticket, result, updates),
            LinkEvent::Status { ticket, result } => self.on_status(ticket, result, updates),
        }
    }

    fn on_move(
        &mut self,
        ticket: Ticket,
        result: Result<Option<MoveConfirmation>, TransportError>,
        updates: &mut Vec<ModelUpdate>,
    ) {
        let pending = match std::mem::replace(&mut self.state, MoveState::Idle) {
            MoveState::AwaitingConfirmation {
                pending,
                ticket: expected,
            } if expected == ticket => pending,
            other => {
                debug!("dropping stale move result (ticket {})", ticket);
                self.state = other;
                return;
            }
        };

        let confirmation = match result {
            Ok(Some(confirmation)) => confirmation,
            Ok(None) => {
                warn!("authority rejected {}", pending.notation);
                updates.push(ModelUpdate::Reverted {
                    pending,
                    reason: RevertReason::Rejected,
                });
                return;
            }
            Err(e) => {
                warn!("move {} failed: {}", pending.notation, e);
                updates.push(ModelUpdate::Reverted {
                    pending,
                    reason: e.into(),
                });
                return;
            }
        };

        let applied = self.session.apply_confirmed(pending, &confirmation);
        let notation = applied.notation;
        updates.push(ModelUpdate::Applied {
            notation: notation.clone(),
        });

        let ticket = self.link.issue_ticket();
        match self.link.send(LinkRequest::QueryStatus { ticket }) {
            Ok(()) => self.state = MoveState::AwaitingStatus { notation, ticket },
            Err(e) => {
                warn!("no status after {}: {}", notation, e);
                updates.push(ModelUpdate::StatusUnavailable);
            }
        }
    }

    fn on_status(
        &mut self,
        ticket: Ticket,
        result: Result<GameStatus, TransportError>,
        updates: &mut Vec<ModelUpdate>,
    ) {
        let notation = match std::mem::replace(&mut self.state, MoveState::Idle) {
            MoveState::AwaitingStatus {
                notation,
                ticket: expected,
            } if expected == ticket => notation,
            other => {
                debug!("dropping stale status (ticket {})", ticket);
                self.state = other;
                return;
            }
        };

        match result {
            Ok(status) => {
                self.session.apply_status(status, &notation);
                if let Some(caption) = &self.session.caption {
                    info!("{}", caption);
                }
                updates.push(ModelUpdate::StatusResolved(status));
            }
            Err(e) => {
                warn!("status after {} failed: {}", notation, e);
                updates.push(ModelUpdate::StatusUnavailable);
            }
        }
    }
}
