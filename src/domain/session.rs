//! Game session state - board, side, history and the game's outcome.

use shakmaty::Square;
use tracing::{debug, info, warn};

use crate::domain::board::Board;
use crate::domain::chess::PieceColor;
use crate::domain::notation::{GesturePolicy, MoveDescriptor, describe_move};
use crate::domain::protocol::{GameStatus, MoveConfirmation};
use crate::domain::special::{
    CastlingRights, en_passant_notation, en_passant_victim, promotion_piece,
};
use crate::error::MoveError;

const RESULT_WHITE_WINS: &str = "(1-0)";
const RESULT_BLACK_WINS: &str = "(0-1)";
const RESULT_DRAW: &str = "(1/2-1/2)";

/// One game as seen by the local player
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    /// Canonical (white-relative) board
    pub board: Board,
    /// The local player's side
    pub color: PieceColor,
    /// Whether the session was decoded from a received message
    pub is_resumed: bool,
    /// Set by a terminal status; the board is frozen afterwards
    pub is_complete: bool,
    /// Notation of every applied move, white's first move first
    pub history: Vec<String>,
    pub caption: Option<String>,
    pub result: Option<String>,
    pub rights: CastlingRights,
}

impl GameSession {
    /// Fresh game from the standard position, local player white
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            color: PieceColor::White,
            is_resumed: false,
            is_complete: false,
            history: Vec::new(),
            caption: None,
            result: None,
            rights: CastlingRights::new(),
        }
    }

    /// Session rebuilt from a received message
    pub fn resumed(
        board: Board,
        color: PieceColor,
        is_complete: bool,
        history: Vec<String>,
    ) -> Self {
        let rights = CastlingRights::infer(&board, &history);
        Self {
            board,
            color,
            is_resumed: true,
            is_complete,
            history,
            caption: None,
            result: None,
            rights,
        }
    }

    /// Turn a canonical gesture into a pending move without touching the
    /// board.
    pub fn prepare_move(
        &self,
        from: Square,
        to: Square,
        policy: GesturePolicy,
    ) -> Result<MoveDescriptor, MoveError> {
        if self.is_complete {
            return Err(MoveError::GameComplete);
        }
        describe_move(&self.board, &self.rights, from, to, policy)
    }

    /// Apply a move the authority accepted. Returns the descriptor as it was
    /// finally recorded (en passant rewrites its notation and capture).
    pub fn apply_confirmed(
        &mut self,
        mut pending: MoveDescriptor,
        confirmation: &MoveConfirmation,
    ) -> MoveDescriptor {
        if confirmation.previous_square != pending.from.to_string() {
            warn!(
                "authority reports origin {} for {} (sent from {})",
                confirmation.previous_square, pending.notation, pending.from
            );
        }
        if confirmation.is_castle != pending.is_castle() {
            warn!(
                "castle flag mismatch for {}: authority says {}",
                pending.notation, confirmation.is_castle
            );
        }

        if confirmation.is_en_passant {
            pending.is_en_passant = true;
            if let Some(victim) = en_passant_victim(pending.from, &self.history) {
                self.board.clear(victim);
                pending.captured = Some(victim);
                pending.notation = en_passant_notation(pending.from, victim);
            }
        }

        if pending.promotes_to.is_some() {
            self.board
                .set(pending.from, Some(promotion_piece(pending.piece.color)));
        }

        self.board.move_piece(pending.from, pending.to);
        self.rights.record_move(pending.from, pending.to);

        if let Some(castle) = pending.castle {
            self.board.move_piece(castle.rook_from, castle.rook_to);
            self.rights.record_move(castle.rook_from, castle.rook_to);
        }

        self.history.push(pending.notation.clone());
        info!("applied {}", pending.notation);
        debug!("board now\n{}", self.board.render_perspective(self.color));

        pending
    }

    /// Record the authority's status after `notation` was played and build
    /// the caption for the outgoing message.
    pub fn apply_status(&mut self, status: GameStatus, notation: &str) {
        let mover_wins = match self.color {
            PieceColor::White => RESULT_WHITE_WINS,
            PieceColor::Black => RESULT_BLACK_WINS,
        };

        let suffix = match status {
            GameStatus::Check => "+!".to_string(),
            GameStatus::Checkmate => format!("# - CheckMate! {}", mover_wins),
            GameStatus::Repetition => format!(" - 3-fold repetition {}", RESULT_DRAW),
            GameStatus::Stalemate => format!(" - Stalemate {}", RESULT_DRAW),
            GameStatus::Normal => String::new(),
        };

        if status.is_terminal() {
            let result = match status {
                GameStatus::Checkmate => mover_wins,
                _ => RESULT_DRAW,
            };
            self.result = Some(result.to_string());
            self.is_complete = true;
            info!("game over {}", result);
        }

        let prefix = if self.is_resumed {
            "Move: "
        } else {
            "New Game Started! Move: "
        };
        self.caption = Some(format!("{}{}{}", prefix, notation, suffix));
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
