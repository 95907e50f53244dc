//! Move notation from a raw drag gesture.
//!
//! The encoder only looks at the piece that moved, its origin, its
//! destination and whether an opposing piece sat on the destination. It
//! never asks whether the move is legal; the authority decides that.

use shakmaty::Square;

use crate::domain::board::Board;
use crate::domain::chess::{Piece, PieceKind, coords};
use crate::domain::special::{Castle, CastlingRights, detect_castle};
use crate::error::MoveError;

/// Everything known about one move attempt, from gesture to confirmation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveDescriptor {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    /// Square whose occupant is removed by this move, if known
    pub captured: Option<Square>,
    pub notation: String,
    pub castle: Option<Castle>,
    pub is_en_passant: bool,
    pub promotes_to: Option<PieceKind>,
}

impl MoveDescriptor {
    pub fn is_castle(&self) -> bool {
        self.castle.is_some()
    }
}

fn is_last_rank(sq: Square) -> bool {
    let (_, rank) = coords(sq);
    rank == 0 || rank == 7
}

/// Algebraic notation for `piece` going `from` -> `to`.
///
/// Pawn captures are prefixed with the origin file; pawns landing on the
/// first or last rank always promote to a queen.
pub fn encode_notation(piece: Piece, from: Square, to: Square, capture: bool) -> String {
    let letter = piece.kind.letter();
    let is_pawn = piece.kind == PieceKind::Pawn;

    let mut notation = match (capture, is_pawn) {
        (true, true) => format!("{}x{}", from.file().char(), to),
        (true, false) => format!("{}x{}", letter, to),
        (false, _) => format!("{}{}", letter, to),
    };

    if is_pawn && is_last_rank(to) {
        notation.push_str("=Q");
    }
    notation
}

/// Reject a pawn changing file onto an empty square when no opposing pawn
/// stands directly beside it (the only case en passant could explain).
pub fn veto_pawn_diagonal(
    board: &Board,
    piece: Piece,
    from: Square,
    to: Square,
    capture: bool,
) -> Result<(), MoveError> {
    if piece.kind != PieceKind::Pawn || capture || from.file() == to.file() {
        return Ok(());
    }

    let enemy_pawn = Some(Piece::new(PieceKind::Pawn, piece.color.other()));
    let (file, rank) = coords(from);
    if board.get(file - 1, rank) == enemy_pawn || board.get(file + 1, rank) == enemy_pawn {
        return Ok(());
    }

    Err(MoveError::IllegalGesture { from, to })
}

/// Options for turning a gesture into a move
#[derive(Clone, Copy, Debug)]
pub struct GesturePolicy {
    /// Run [`veto_pawn_diagonal`] before submission
    pub pawn_veto: bool,
}

impl Default for GesturePolicy {
    fn default() -> Self {
        Self { pawn_veto: true }
    }
}

/// Build the pending move for a canonical gesture.
///
/// Computes notation, applies the pawn veto and rewrites king moves onto
/// the castling squares as `O-O` / `O-O-O`.
pub fn describe_move(
    board: &Board,
    rights: &CastlingRights,
    from: Square,
    to: Square,
    policy: GesturePolicy,
) -> Result<MoveDescriptor, MoveError> {
    let piece = board.piece_at(from).ok_or(MoveError::EmptyOrigin(from))?;
    if from == to {
        return Err(MoveError::NullGesture(from));
    }

    let capture = board
        .piece_at(to)
        .is_some_and(|target| target.color != piece.color);

    if policy.pawn_veto {
        veto_pawn_diagonal(board, piece, from, to, capture)?;
    }

    let mut notation = encode_notation(piece, from, to, capture);

    let castle = detect_castle(board, rights, piece, from, &notation);
    if let Some(castle) = &castle {
        notation = castle.side.notation().to_string();
    }

    let promotes_to = notation.ends_with("=Q").then_some(PieceKind::Queen);

    Ok(MoveDescriptor {
        from,
        to,
        piece,
        captured: capture.then_some(to),
        notation,
        castle,
        is_en_passant: false,
        promotes_to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chess::PieceColor;

    fn white(kind: PieceKind) -> Piece {
        Piece::new(kind, PieceColor::White)
    }

    fn black(kind: PieceKind) -> Piece {
        Piece::new(kind, PieceColor::Black)
    }

    #[test]
    fn test_knight_move() {
        assert_eq!(
            encode_notation(white(PieceKind::Knight), Square::B1, Square::C3, false),
            "Nc3"
        );
    }

    #[test]
    fn test_pawn_push() {
        assert_eq!(
            encode_notation(white(PieceKind::Pawn), Square::E2, Square::E4, false),
            "e4"
        );
    }

    #[test]
    fn test_pawn_capture_uses_source_file() {
        assert_eq!(
            encode_notation(white(PieceKind::Pawn), Square::E4, Square::D5, true),
            "exd5"
        );
    }

    #[test]
    fn test_piece_capture() {
        assert_eq!(
            encode_notation(black(PieceKind::Bishop), Square::C8, Square::G4, true),
            "Bxg4"
        );
    }

    #[test]
    fn test_promotion_is_always_queen() {
        assert_eq!(
            encode_notation(white(PieceKind::Pawn), Square::A7, Square::A8, false),
            "a8=Q"
        );
        assert_eq!(
            encode_notation(black(PieceKind::Pawn), Square::B2, Square::A1, true),
            "bxa1=Q"
        );
    }

    #[test]
    fn test_non_pawn_on_last_rank_does_not_promote() {
        assert_eq!(
            encode_notation(white(PieceKind::Rook), Square::A1, Square::A8, false),
            "Ra8"
        );
    }

    #[test]
    fn test_veto_rejects_lonely_diagonal() {
        let board = Board::standard();
        let result = veto_pawn_diagonal(&board, white(PieceKind::Pawn), Square::E2, Square::D3, false);
        assert_eq!(
            result,
            Err(MoveError::IllegalGesture {
                from: Square::E2,
                to: Square::D3
            })
        );
    }

    #[test]
    fn test_veto_allows_adjacent_enemy_pawn() {
        let mut board = Board::empty();
        board.set(Square::E5, Some(white(PieceKind::Pawn)));
        board.set(Square::D5, Some(black(PieceKind::Pawn)));
        assert!(
            veto_pawn_diagonal(&board, white(PieceKind::Pawn), Square::E5, Square::D6, false)
                .is_ok()
        );
        // the neighbour does not need to be on the capture side
        assert!(
            veto_pawn_diagonal(&board, white(PieceKind::Pawn), Square::E5, Square::F6, false)
                .is_ok()
        );
    }

    #[test]
    fn test_veto_ignores_own_pawns() {
        let mut board = Board::empty();
        board.set(Square::E5, Some(white(PieceKind::Pawn)));
        board.set(Square::D5, Some(white(PieceKind::Pawn)));
        assert!(
            veto_pawn_diagonal(&board, white(PieceKind::Pawn), Square::E5, Square::D6, false)
                .is_err()
        );
    }

    #[test]
    fn test_veto_passes_captures_and_pushes() {
        let board = Board::standard();
        let pawn = white(PieceKind::Pawn);
        assert!(veto_pawn_diagonal(&board, pawn, Square::E2, Square::E4, false).is_ok());
        assert!(veto_pawn_diagonal(&board, pawn, Square::E6, Square::D7, true).is_ok());
    }

    #[test]
    fn test_describe_capture() {
        let mut board = Board::standard();
        board.move_piece(Square::E2, Square::E4);
        board.move_piece(Square::D7, Square::D5);
        let desc = describe_move(
            &board,
            &CastlingRights::new(),
            Square::E4,
            Square::D5,
            GesturePolicy::default(),
        )
        .unwrap();
        assert_eq!(desc.notation, "exd5");
        assert_eq!(desc.captured, Some(Square::D5));
        assert!(!desc.is_castle());
    }

    #[test]
    fn test_describe_castle() {
        let mut board = Board::standard();
        board.clear(Square::F1);
        board.clear(Square::G1);
        let desc = describe_move(
            &board,
            &CastlingRights::new(),
            Square::E1,
            Square::G1,
            GesturePolicy::default(),
        )
        .unwrap();
        assert_eq!(desc.notation, "O-O");
        let castle = desc.castle.unwrap();
        assert_eq!((castle.rook_from, castle.rook_to), (Square::H1, Square::F1));
    }

    #[test]
    fn test_describe_own_piece_on_target_is_not_capture() {
        let board = Board::standard();
        let desc = describe_move(
            &board,
            &CastlingRights::new(),
            Square::D1,
            Square::D2,
            GesturePolicy::default(),
        )
        .unwrap();
        assert_eq!(desc.notation, "Qd2");
        assert_eq!(desc.captured, None);
    }

    #[test]
    fn test_describe_promotion() {
        let mut board = Board::empty();
        board.set(Square::G7, Some(white(PieceKind::Pawn)));
        let desc = describe_move(
            &board,
            &CastlingRights::new(),
            Square::G7,
            Square::G8,
            GesturePolicy::default(),
        )
        .unwrap();
        assert_eq!(desc.notation, "g8=Q");
        assert_eq!(desc.promotes_to, Some(PieceKind::Queen));
    }

    #[test]
    fn test_describe_refuses_empty_and_null_gestures() {
        let board = Board::standard();
        let rights = CastlingRights::new();
        let policy = GesturePolicy::default();
        assert_eq!(
            describe_move(&board, &rights, Square::E4, Square::E5, policy),
            Err(MoveError::EmptyOrigin(Square::E4))
        );
        assert_eq!(
            describe_move(&board, &rights, Square::E2, Square::E2, policy),
            Err(MoveError::NullGesture(Square::E2))
        );
    }

    #[test]
    fn test_veto_can_be_disabled() {
        let board = Board::standard();
        let rights = CastlingRights::new();
        let policy = GesturePolicy { pawn_veto: false };
        let desc = describe_move(&board, &rights, Square::E2, Square::D3, policy).unwrap();
        assert_eq!(desc.notation, "d3");
    }
}
