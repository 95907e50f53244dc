//! Physical <-> canonical coordinate mapping.
//!
//! The local player's pieces are always drawn at the bottom. For white that
//! is the canonical orientation; for black the board is turned 180 degrees,
//! so physical (file, rank) maps to canonical (7 - file, 7 - rank). Every
//! other module works in canonical squares only.

use shakmaty::{File, Rank, Square};

use crate::domain::chess::{PieceColor, coords};

fn rotate(sq: Square) -> Square {
    let (file, rank) = coords(sq);
    Square::from_coords(File::new((7 - file) as u32), Rank::new((7 - rank) as u32))
}

/// Map a square as seen on screen to the canonical board
pub fn to_canonical(physical: Square, color: PieceColor) -> Square {
    match color {
        PieceColor::White => physical,
        PieceColor::Black => rotate(physical),
    }
}

/// Map a canonical square to where it is drawn for `color`
pub fn to_physical(canonical: Square, color: PieceColor) -> Square {
    match color {
        PieceColor::White => canonical,
        PieceColor::Black => rotate(canonical),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_involution_for_every_square() {
        for color in [PieceColor::White, PieceColor::Black] {
            for sq in Square::ALL {
                assert_eq!(to_physical(to_canonical(sq, color), color), sq);
                assert_eq!(to_canonical(to_canonical(sq, color), color), sq);
            }
        }
    }

    #[test]
    fn test_white_is_identity() {
        assert_eq!(to_canonical(Square::B1, PieceColor::White), Square::B1);
        assert_eq!(to_physical(Square::H8, PieceColor::White), Square::H8);
    }

    #[test]
    fn test_black_is_rotated() {
        assert_eq!(to_canonical(Square::A1, PieceColor::Black), Square::H8);
        assert_eq!(to_canonical(Square::E2, PieceColor::Black), Square::D7);
        assert_eq!(to_physical(Square::E8, PieceColor::Black), Square::D1);
    }
}
