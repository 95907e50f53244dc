//! Query-string form of a session, carried inside the message handed from
//! one player to the other.
//!
//! Keys: `board` (64 cells, rank 8 first, `' '` empty), `color` (`0`/`1`),
//! `complete` (`0`/`1`) and `history` (moves joined with `|`). Only `board`
//! is required.

use tracing::warn;
use url::form_urlencoded;

use crate::domain::board::{Board, LayoutError};
use crate::domain::chess::PieceColor;
use crate::domain::session::GameSession;
use crate::error::SessionError;

const BOARD_KEY: &str = "board";
const COLOR_KEY: &str = "color";
const COMPLETE_KEY: &str = "complete";
const HISTORY_KEY: &str = "history";
const HISTORY_SEPARATOR: char = '|';

fn parse_flag(key: &'static str, value: &str) -> Result<u8, SessionError> {
    match value {
        "0" => Ok(0),
        "1" => Ok(1),
        _ => Err(SessionError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}

/// The query part of a message URL, or the payload itself if it has none
fn query_part(payload: &str) -> &str {
    let query = payload.split_once('?').map_or(payload, |(_, query)| query);
    query.split('#').next().unwrap_or(query)
}

impl GameSession {
    fn encode_as(&self, color: PieceColor) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(BOARD_KEY, &self.board.to_layout())
            .append_pair(COLOR_KEY, &color.flag().to_string())
            .append_pair(COMPLETE_KEY, if self.is_complete { "1" } else { "0" })
            .append_pair(HISTORY_KEY, &self.history.join("|"))
            .finish()
    }

    /// Encode this session as it stands
    pub fn to_query(&self) -> String {
        self.encode_as(self.color)
    }

    /// Payload for the opponent: same game, other side to play
    pub fn handoff_query(&self) -> String {
        self.encode_as(self.color.other())
    }

    /// Decode a payload (bare query string or full message URL)
    pub fn from_query(payload: &str) -> Result<GameSession, SessionError> {
        let mut board = None;
        let mut color = PieceColor::Black;
        let mut is_complete = false;
        let mut history = Vec::new();

        for (key, value) in form_urlencoded::parse(query_part(payload).as_bytes()) {
            match key.as_ref() {
                BOARD_KEY => {
                    let parsed = Board::from_layout(&value).map_err(|e| match e {
                        LayoutError::Length(n) => SessionError::BoardLength(n),
                        LayoutError::Cell(c) => SessionError::InvalidCell(c),
                    })?;
                    board = Some(parsed);
                }
                COLOR_KEY => {
                    let flag = parse_flag(COLOR_KEY, &value)?;
                    color = PieceColor::from_flag(flag).unwrap_or(PieceColor::Black);
                }
                COMPLETE_KEY => is_complete = parse_flag(COMPLETE_KEY, &value)? == 1,
                HISTORY_KEY => {
                    history = value
                        .split(HISTORY_SEPARATOR)
                        .filter(|m| !m.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                _ => {}
            }
        }

        let board = board.ok_or(SessionError::MissingBoard)?;
        Ok(GameSession::resumed(board, color, is_complete, history))
    }

    /// Resume from a received payload, falling back to a fresh game when
    /// there is none or it cannot be decoded.
    pub fn resume_or_new(payload: Option<&str>) -> GameSession {
        let Some(payload) = payload else {
            return GameSession::new();
        };
        match GameSession::from_query(payload) {
            Ok(session) => session,
            Err(e) => {
                warn!("ignoring malformed session payload: {}", e);
                GameSession::new()
            }
        }
    }
}
