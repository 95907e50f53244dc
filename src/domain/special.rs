//! Castling, en passant and promotion handling.
//!
//! None of this is rule checking. Castling is guessed before submission
//! from the king's destination plus the castling rights tracked here; en
//! passant is only resolved after the authority says the move was one.

use shakmaty::{File, Square};

use crate::domain::board::Board;
use crate::domain::chess::{Piece, PieceColor, PieceKind, coords, square_at};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    pub fn notation(self) -> &'static str {
        match self {
            CastleSide::King => "O-O",
            CastleSide::Queen => "O-O-O",
        }
    }

    fn index(self) -> usize {
        match self {
            CastleSide::King => 0,
            CastleSide::Queen => 1,
        }
    }

    fn king_target_file(self) -> File {
        match self {
            CastleSide::King => File::G,
            CastleSide::Queen => File::C,
        }
    }

    fn rook_home_file(self) -> File {
        match self {
            CastleSide::King => File::H,
            CastleSide::Queen => File::A,
        }
    }

    fn rook_target_file(self) -> File {
        match self {
            CastleSide::King => File::F,
            CastleSide::Queen => File::D,
        }
    }

    pub fn rook_home(self, color: PieceColor) -> Square {
        Square::from_coords(self.rook_home_file(), color.back_rank())
    }

    pub fn rook_target(self, color: PieceColor) -> Square {
        Square::from_coords(self.rook_target_file(), color.back_rank())
    }

    pub fn king_target(self, color: PieceColor) -> Square {
        Square::from_coords(self.king_target_file(), color.back_rank())
    }
}

pub fn king_home(color: PieceColor) -> Square {
    Square::from_coords(File::E, color.back_rank())
}

fn side_index(color: PieceColor) -> usize {
    match color {
        PieceColor::White => 0,
        PieceColor::Black => 1,
    }
}

/// Rook relocation that accompanies a recognised castle
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Castle {
    pub side: CastleSide,
    pub rook_from: Square,
    pub rook_to: Square,
}

/// Which kings and rooks have left (or been taken from) their home squares
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct CastlingRights {
    king_moved: [bool; 2],
    rook_moved: [[bool; 2]; 2],
}

impl CastlingRights {
    /// Rights of a game that has not started
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstruct rights for a resumed game. A king or rook that is not on
    /// its home square has moved; so has a king whose side ever played a
    /// king move or castled (history starts with white's first move).
    pub fn infer(board: &Board, history: &[String]) -> Self {
        let mut rights = Self::new();
        for color in [PieceColor::White, PieceColor::Black] {
            let side = side_index(color);
            let parity = side;
            let king_moved_in_history = history
                .iter()
                .enumerate()
                .filter(|(ply, _)| ply % 2 == parity)
                .any(|(_, notation)| notation.starts_with('K') || notation.starts_with("O-O"));
            rights.king_moved[side] = king_moved_in_history
                || board.piece_at(king_home(color)) != Some(Piece::new(PieceKind::King, color));

            for castle in [CastleSide::King, CastleSide::Queen] {
                rights.rook_moved[side][castle.index()] = board.piece_at(castle.rook_home(color))
                    != Some(Piece::new(PieceKind::Rook, color));
            }
        }
        rights
    }

    pub fn may_castle(&self, color: PieceColor, side: CastleSide) -> bool {
        let idx = side_index(color);
        !self.king_moved[idx] && !self.rook_moved[idx][side.index()]
    }

    pub fn has_king_moved(&self, color: PieceColor) -> bool {
        self.king_moved[side_index(color)]
    }

    /// Update after a confirmed move. Anything leaving or landing on a home
    /// square spends the matching right, so captured rooks count too.
    pub fn record_move(&mut self, from: Square, to: Square) {
        for color in [PieceColor::White, PieceColor::Black] {
            let idx = side_index(color);
            let home = king_home(color);
            if from == home || to == home {
                self.king_moved[idx] = true;
            }
            for castle in [CastleSide::King, CastleSide::Queen] {
                let rook_home = castle.rook_home(color);
                if from == rook_home || to == rook_home {
                    self.rook_moved[idx][castle.index()] = true;
                }
            }
        }
    }
}

/// Recognise a castle from a king move whose notation names the castling
/// destination (`Kg1`/`Kc1` for white, `Kg8`/`Kc8` for black).
pub fn detect_castle(
    board: &Board,
    rights: &CastlingRights,
    piece: Piece,
    from: Square,
    notation: &str,
) -> Option<Castle> {
    if piece.kind != PieceKind::King || from != king_home(piece.color) {
        return None;
    }

    let side = [CastleSide::King, CastleSide::Queen]
        .into_iter()
        .find(|side| notation == format!("K{}", side.king_target(piece.color)))?;

    if !rights.may_castle(piece.color, side) {
        return None;
    }

    let rook_from = side.rook_home(piece.color);
    if board.piece_at(rook_from) != Some(Piece::new(PieceKind::Rook, piece.color)) {
        return None;
    }

    Some(Castle {
        side,
        rook_from,
        rook_to: side.rook_target(piece.color),
    })
}

/// Square of the pawn taken en passant by a pawn leaving `from`.
///
/// The victim stands beside the origin on the same rank. If the last
/// recorded move names the left neighbour the victim is on the left,
/// otherwise on the right (or the left when the right is off the board).
pub fn en_passant_victim(from: Square, history: &[String]) -> Option<Square> {
    let (file, rank) = coords(from);
    let left = square_at(file - 1, rank);
    let right = square_at(file + 1, rank);

    let last = history.last().map(String::as_str);
    match left {
        Some(sq) if last == Some(sq.to_string().as_str()) => Some(sq),
        _ => right.or(left),
    }
}

/// Notation of an en passant capture: `exd5` names the victim's square
pub fn en_passant_notation(from: Square, victim: Square) -> String {
    format!("{}x{}", from.file().char(), victim)
}

/// Promotion piece for a pawn reaching the last rank; always a queen
pub fn promotion_piece(color: PieceColor) -> Piece {
    Piece::new(PieceKind::Queen, color)
}
