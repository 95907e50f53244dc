//! Pure chess domain types and utilities.
//! No I/O here - this is the domain layer.

use shakmaty::{Color as SColor, File, Rank, Role, Square};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceColor {
    White,
    Black,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl PieceKind {
    /// Notation letter for this kind ("" for pawns)
    pub fn letter(self) -> &'static str {
        match self {
            PieceKind::King => "K",
            PieceKind::Queen => "Q",
            PieceKind::Bishop => "B",
            PieceKind::Knight => "N",
            PieceKind::Rook => "R",
            PieceKind::Pawn => "",
        }
    }

    fn name(self) -> &'static str {
        match self {
            PieceKind::King => "king",
            PieceKind::Queen => "queen",
            PieceKind::Bishop => "bishop",
            PieceKind::Knight => "knight",
            PieceKind::Rook => "rook",
            PieceKind::Pawn => "pawn",
        }
    }
}

impl PieceColor {
    /// Session encoding of the local side: 1 = white, 0 = black
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            1 => Some(PieceColor::White),
            0 => Some(PieceColor::Black),
            _ => None,
        }
    }

    pub fn flag(self) -> u8 {
        match self {
            PieceColor::White => 1,
            PieceColor::Black => 0,
        }
    }

    pub fn other(self) -> Self {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
        }
    }

    /// Rank the side's king and rooks start on
    pub fn back_rank(self) -> Rank {
        match self {
            PieceColor::White => Rank::First,
            PieceColor::Black => Rank::Eighth,
        }
    }
}

impl Piece {
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    /// Single-character cell encoding: uppercase white, lowercase black
    pub fn to_char(self) -> char {
        shakmaty::Piece::from(self).char()
    }

    pub fn from_char(c: char) -> Option<Self> {
        shakmaty::Piece::from_char(c).map(shakmaty_to_piece)
    }

    /// Image resource name, e.g. `knight_black`
    pub fn resource_name(self) -> String {
        let side = match self.color {
            PieceColor::White => "white",
            PieceColor::Black => "black",
        };
        format!("{}_{}", self.kind.name(), side)
    }
}

impl From<Piece> for shakmaty::Piece {
    fn from(piece: Piece) -> Self {
        let role = match piece.kind {
            PieceKind::Pawn => Role::Pawn,
            PieceKind::Knight => Role::Knight,
            PieceKind::Bishop => Role::Bishop,
            PieceKind::Rook => Role::Rook,
            PieceKind::Queen => Role::Queen,
            PieceKind::King => Role::King,
        };
        let color = match piece.color {
            PieceColor::White => SColor::White,
            PieceColor::Black => SColor::Black,
        };
        shakmaty::Piece { color, role }
    }
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    let color = match piece.color {
        SColor::White => PieceColor::White,
        SColor::Black => PieceColor::Black,
    };
    Piece { kind, color }
}

/// Square at (file, rank), both 0-indexed, or None when off the board
pub fn square_at(file: i32, rank: i32) -> Option<Square> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(Square::from_coords(File::new(file as u32), Rank::new(rank as u32)))
    } else {
        None
    }
}

/// Zero-based (file, rank) of a square
pub fn coords(sq: Square) -> (i32, i32) {
    (i32::from(sq.file()), i32::from(sq.rank()))
}
