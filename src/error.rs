//! Error types for move handling, transport and session decoding.
//!
//! None of these are fatal: every failure degrades to "no state change"
//! plus a log line at the call site.

use shakmaty::Square;

/// A gesture the client refuses before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// Another move is still waiting for the authority
    #[error("a move is already in flight")]
    MoveInFlight,

    /// The game has ended; the board is frozen
    #[error("the game is complete")]
    GameComplete,

    /// Nothing to pick up on the origin square
    #[error("no piece on {0}")]
    EmptyOrigin(Square),

    /// The piece was dropped where it was picked up
    #[error("piece dropped on its own square {0}")]
    NullGesture(Square),

    /// Pawn moved diagonally with nothing to capture
    #[error("illegal pawn move {from} -> {to}")]
    IllegalGesture { from: Square, to: Square },
}

/// Failure talking to the remote authority
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authority answered {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid authority url: {0}")]
    Url(#[from] url::ParseError),

    /// The worker thread owning the client has gone away
    #[error("authority link closed")]
    Disconnected,
}

/// Resume payload that cannot be turned into a session
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("missing board")]
    MissingBoard,

    #[error("board has {0} cells, expected 64")]
    BoardLength(usize),

    #[error("invalid board cell {0:?}")]
    InvalidCell(char),

    #[error("invalid value {value:?} for {key}")]
    InvalidFlag { key: &'static str, value: String },
}
