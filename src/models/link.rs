//! Link to the remote authority.
//!
//! Architecture:
//! - Authority calls block, so they run on a dedicated OS thread
//! - Requests go in over one channel, results come back over another
//! - The owner polls (or waits on) the event channel and applies results
//!   on its own thread, so the session is never touched concurrently
//!
//! Every request carries a ticket. A result whose ticket the owner has
//! already given up on is simply dropped.
//!
//! Dropping the link skips whatever is still queued and does not wait for
//! a call already on the wire; that call finishes in the background within
//! the client's timeout and its result is discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::domain::protocol::{GameStatus, MoveConfirmation};
use crate::error::TransportError;
use crate::models::authority::Authority;

pub type Ticket = u64;

/// Work for the authority thread
#[derive(Debug)]
pub enum LinkRequest {
    NewGame,
    SubmitMove { ticket: Ticket, notation: String },
    QueryStatus { ticket: Ticket },
    Shutdown,
}

/// Results sent back from the authority thread
#[derive(Debug)]
pub enum LinkEvent {
    NewGame(Result<(), TransportError>),
    Move {
        ticket: Ticket,
        result: Result<Option<MoveConfirmation>, TransportError>,
    },
    Status {
        ticket: Ticket,
        result: Result<GameStatus, TransportError>,
    },
}

pub struct AuthorityLink {
    request_sender: Sender<LinkRequest>,
    event_receiver: Receiver<LinkEvent>,
    /// Set on drop; the worker stops before starting another request
    stopping: Arc<AtomicBool>,
    next_ticket: Ticket,
}

impl AuthorityLink {
    /// Spawn the worker thread that owns `authority`
    pub fn spawn(authority: Box<dyn Authority + Send>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<LinkRequest>();
        let (event_tx, event_rx) = mpsc::channel::<LinkEvent>();
        let stopping = Arc::new(AtomicBool::new(false));

        let worker_stopping = Arc::clone(&stopping);
        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                if worker_stopping.load(Ordering::Acquire) {
                    break;
                }
                let event = match request {
                    LinkRequest::NewGame => LinkEvent::NewGame(authority.start_new_game()),
                    LinkRequest::SubmitMove { ticket, notation } => LinkEvent::Move {
                        ticket,
                        result: authority.submit_move(&notation),
                    },
                    LinkRequest::QueryStatus { ticket } => LinkEvent::Status {
                        ticket,
                        result: authority.query_status(),
                    },
                    LinkRequest::Shutdown => break,
                };
                if event_tx.send(event).is_err() {
                    break;
                }
            }
            debug!("authority link stopped");
        });

        Self {
            request_sender: request_tx,
            event_receiver: event_rx,
            stopping,
            next_ticket: 0,
        }
    }

    /// Fresh ticket for the next request
    pub fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        self.next_ticket
    }

    pub fn send(&self, request: LinkRequest) -> Result<(), TransportError> {
        self.request_sender
            .send(request)
            .map_err(|_| TransportError::Disconnected)
    }

    /// Next finished request, if one is ready
    pub fn try_recv(&self) -> Option<LinkEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Block until a request finishes or `timeout` passes
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<LinkEvent>, TransportError> {
        match self.event_receiver.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(TransportError::Disconnected),
        }
    }
}

impl Drop for AuthorityLink {
    fn drop(&mut self) {
        self.stopping.store(true, Ordering::Release);
        // wakes an idle worker
        let _ = self.request_sender.send(LinkRequest::Shutdown);
    }
}
