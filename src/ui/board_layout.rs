//! Board layout calculations - handles sizing and coordinate transformations.
//!
//! Everything here is in physical squares: row 0 is the top of the board as
//! the local player sees it.

use shakmaty::{File, Rank, Square};

use crate::ui::theme::{BOARD_TOP_OFFSET, SQUARE_SIZE};

/// Handles all layout calculations for the chess board
#[derive(Clone, Copy, Debug)]
pub struct BoardLayout {
    square_size: f32,
    top_offset: f32,
}

impl BoardLayout {
    pub fn new(square_size: f32, top_offset: f32) -> Self {
        Self {
            square_size,
            top_offset,
        }
    }

    pub fn square_size(&self) -> f32 {
        self.square_size
    }

    /// Get the total size of the board (8 squares)
    pub fn board_total_size(&self) -> f32 {
        self.square_size * 8.0
    }

    /// Physical square drawn at `row` / `col`
    pub fn square_at(row: usize, col: usize) -> Option<Square> {
        if row >= 8 || col >= 8 {
            return None;
        }
        Some(Square::from_coords(
            File::new(col as u32),
            Rank::new(7 - row as u32),
        ))
    }

    /// Top-left corner of a physical square
    pub fn square_origin(&self, sq: Square) -> (f32, f32) {
        let col = u32::from(sq.file()) as f32;
        let row = (7 - u32::from(sq.rank())) as f32;
        (col * self.square_size, row * self.square_size + self.top_offset)
    }

    /// Convert a position on the rendered image to a physical square (if within board)
    pub fn pos_to_square(&self, x: f32, y: f32) -> Option<Square> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let board_y = y - self.top_offset;
        if x < 0.0 || board_y < 0.0 {
            return None;
        }

        let col = (x / self.square_size) as usize;
        let row = (board_y / self.square_size) as usize;
        Self::square_at(row, col)
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::new(SQUARE_SIZE, BOARD_TOP_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_origin() {
        let layout = BoardLayout::default();
        assert_eq!(layout.square_origin(Square::A8), (0.0, 10.0));
        assert_eq!(layout.square_origin(Square::H1), (252.0, 262.0));
        assert_eq!(layout.board_total_size(), 288.0);
    }

    #[test]
    fn test_pos_to_square() {
        let layout = BoardLayout::default();
        assert_eq!(layout.pos_to_square(1.0, 11.0), Some(Square::A8));
        assert_eq!(layout.pos_to_square(40.0, 270.0), Some(Square::B1));
        assert_eq!(layout.pos_to_square(10.0, 5.0), None);
        assert_eq!(layout.pos_to_square(290.0, 100.0), None);
        assert_eq!(layout.pos_to_square(-1.0, 100.0), None);
    }

    #[test]
    fn test_pos_to_square_rejects_non_finite() {
        let layout = BoardLayout::default();
        assert_eq!(layout.pos_to_square(f32::NAN, 20.0), None);
        assert_eq!(layout.pos_to_square(20.0, f32::NAN), None);
        assert_eq!(layout.pos_to_square(f32::INFINITY, 20.0), None);
        assert_eq!(layout.pos_to_square(20.0, f32::NEG_INFINITY), None);
    }

    #[test]
    fn test_origin_and_hit_test_agree() {
        let layout = BoardLayout::default();
        for sq in Square::ALL {
            let (x, y) = layout.square_origin(sq);
            let half = layout.square_size() / 2.0;
            assert_eq!(layout.pos_to_square(x + half, y + half), Some(sq));
        }
    }
}
