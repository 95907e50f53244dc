//! Wire format of the remote authority.
//!
//! This module only describes requests and responses. Sending them is the
//! job of the models layer.
//!
//! Every response field is optional on the wire: a move response missing
//! any part of its `move` object is a rejection, and a status response
//! with no true flag is a normal position.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const NEW_GAME_PATH: &str = "new";
pub const MOVE_PATH: &str = "move";
pub const STATUS_PATH: &str = "status";

/// Query parameter (and form field) carrying the notation
pub const MOVE_PARAM: &str = "move";

/// Form-encoded body of a move submission (`move=<notation>`)
pub fn move_request_body(notation: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair(MOVE_PARAM, notation)
        .finish()
}

/// Body of `POST /move`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub accepted: Option<AcceptedMove>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedMove {
    pub castle: Option<bool>,
    pub en_passant: Option<bool>,
    pub prev_square: Option<PrevSquare>,
}

/// Origin square of the accepted move
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PrevSquare {
    pub file: Option<String>,
    pub rank: Option<u32>,
}

/// What the authority confirmed about a submitted move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveConfirmation {
    pub is_castle: bool,
    pub is_en_passant: bool,
    /// Origin square as the authority names it, e.g. `e2`
    pub previous_square: String,
}

impl MoveResponse {
    /// The confirmation, or None when any field is missing
    pub fn confirmation(self) -> Option<MoveConfirmation> {
        let accepted = self.accepted?;
        let prev = accepted.prev_square?;
        Some(MoveConfirmation {
            is_castle: accepted.castle?,
            is_en_passant: accepted.en_passant?,
            previous_square: format!("{}{}", prev.file?, prev.rank?),
        })
    }
}

pub fn parse_move_response(body: &str) -> Result<Option<MoveConfirmation>, serde_json::Error> {
    let response: MoveResponse = serde_json::from_str(body)?;
    Ok(response.confirmation())
}

/// Body of `GET /status`
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub is_check: Option<bool>,
    pub is_checkmate: Option<bool>,
    pub is_repetition: Option<bool>,
    pub is_stalemate: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Check,
    Checkmate,
    Repetition,
    Stalemate,
    Normal,
}

impl StatusResponse {
    /// First set flag in the order check, checkmate, repetition, stalemate
    pub fn status(&self) -> GameStatus {
        let flagged = |flag: Option<bool>| flag == Some(true);
        if flagged(self.is_check) {
            GameStatus::Check
        } else if flagged(self.is_checkmate) {
            GameStatus::Checkmate
        } else if flagged(self.is_repetition) {
            GameStatus::Repetition
        } else if flagged(self.is_stalemate) {
            GameStatus::Stalemate
        } else {
            GameStatus::Normal
        }
    }
}

impl GameStatus {
    /// Whether this status ends the game
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Repetition | GameStatus::Stalemate
        )
    }
}

pub fn parse_status_response(body: &str) -> Result<GameStatus, serde_json::Error> {
    let response: StatusResponse = serde_json::from_str(body)?;
    Ok(response.status())
}

/// JSON Schema of both response bodies, keyed by endpoint
pub fn response_schemas() -> serde_json::Value {
    serde_json::json!({
        "move": schemars::schema_for!(MoveResponse),
        "status": schemars::schema_for!(StatusResponse),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_move() {
        let body = r#"{"move":{"castle":false,"enPassant":false,"prevSquare":{"file":"e","rank":2}}}"#;
        let confirmation = parse_move_response(body).unwrap().unwrap();
        assert!(!confirmation.is_castle);
        assert!(!confirmation.is_en_passant);
        assert_eq!(confirmation.previous_square, "e2");
    }

    #[test]
    fn test_parse_castle_and_en_passant_flags() {
        let body = r#"{"move":{"castle":true,"enPassant":false,"prevSquare":{"file":"e","rank":1}}}"#;
        assert!(parse_move_response(body).unwrap().unwrap().is_castle);

        let body = r#"{"move":{"castle":false,"enPassant":true,"prevSquare":{"file":"e","rank":5}}}"#;
        assert!(parse_move_response(body).unwrap().unwrap().is_en_passant);
    }

    #[test]
    fn test_missing_move_is_rejection() {
        assert_eq!(parse_move_response("{}").unwrap(), None);
        assert_eq!(parse_move_response(r#"{"move":null}"#).unwrap(), None);
    }

    #[test]
    fn test_partial_move_is_rejection() {
        let body = r#"{"move":{"castle":false,"prevSquare":{"file":"e","rank":2}}}"#;
        assert_eq!(parse_move_response(body).unwrap(), None);

        let body = r#"{"move":{"castle":false,"enPassant":false,"prevSquare":{"file":"e"}}}"#;
        assert_eq!(parse_move_response(body).unwrap(), None);

        let body = r#"{"move":{"castle":false,"enPassant":false}}"#;
        assert_eq!(parse_move_response(body).unwrap(), None);
    }

    #[test]
    fn test_non_json_move_is_decode_error() {
        assert!(parse_move_response("illegal move").is_err());
    }

    #[test]
    fn test_status_priority() {
        assert_eq!(parse_status_response("{}").unwrap(), GameStatus::Normal);
        assert_eq!(
            parse_status_response(r#"{"isCheck":true,"isCheckmate":true}"#).unwrap(),
            GameStatus::Check
        );
        assert_eq!(
            parse_status_response(r#"{"isCheck":false,"isCheckmate":true}"#).unwrap(),
            GameStatus::Checkmate
        );
        assert_eq!(
            parse_status_response(r#"{"isRepetition":true,"isStalemate":true}"#).unwrap(),
            GameStatus::Repetition
        );
        assert_eq!(
            parse_status_response(r#"{"isStalemate":true}"#).unwrap(),
            GameStatus::Stalemate
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(GameStatus::Checkmate.is_terminal());
        assert!(GameStatus::Repetition.is_terminal());
        assert!(GameStatus::Stalemate.is_terminal());
        assert!(!GameStatus::Check.is_terminal());
        assert!(!GameStatus::Normal.is_terminal());
    }

    #[test]
    fn test_move_request_body() {
        assert_eq!(move_request_body("Nc3"), "move=Nc3");
        assert_eq!(move_request_body("e8=Q"), "move=e8%3DQ");
    }

    #[test]
    fn test_schemas_use_wire_names() {
        let schemas = response_schemas().to_string();
        assert!(schemas.contains("prevSquare"));
        assert!(schemas.contains("enPassant"));
        assert!(schemas.contains("isCheckmate"));
    }
}
