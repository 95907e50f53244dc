//! Canonical 8x8 board.
//!
//! Cells are stored rank-major from rank 8 down to rank 1, files a..h left
//! to right, so index `(7 - rank) * 8 + file` holds the cell at (file, rank).
//! This is the same order the session string uses.

use std::fmt;

use shakmaty::{File, Rank, Square};

use crate::domain::chess::{Piece, PieceColor, PieceKind, coords};
use crate::domain::perspective::to_canonical;

pub const CELLS: usize = 64;

pub type Cell = Option<Piece>;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [Cell; CELLS],
}

fn index(sq: Square) -> usize {
    let (file, rank) = coords(sq);
    ((7 - rank) * 8 + file) as usize
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [None; CELLS],
        }
    }

    /// Standard starting position
    pub fn standard() -> Self {
        const BACK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for (file, kind) in BACK.iter().enumerate() {
            let file = File::new(file as u32);
            board.set(
                Square::from_coords(file, Rank::First),
                Some(Piece::new(*kind, PieceColor::White)),
            );
            board.set(
                Square::from_coords(file, Rank::Second),
                Some(Piece::new(PieceKind::Pawn, PieceColor::White)),
            );
            board.set(
                Square::from_coords(file, Rank::Seventh),
                Some(Piece::new(PieceKind::Pawn, PieceColor::Black)),
            );
            board.set(
                Square::from_coords(file, Rank::Eighth),
                Some(Piece::new(*kind, PieceColor::Black)),
            );
        }
        board
    }

    /// Cell at (file, rank). Off-board coordinates read as empty.
    pub fn get(&self, file: i32, rank: i32) -> Cell {
        crate::domain::chess::square_at(file, rank).and_then(|sq| self.piece_at(sq))
    }

    pub fn piece_at(&self, sq: Square) -> Cell {
        self.cells[index(sq)]
    }

    pub fn set(&mut self, sq: Square, cell: Cell) {
        self.cells[index(sq)] = cell;
    }

    pub fn clear(&mut self, sq: Square) {
        self.set(sq, None);
    }

    /// Copy the source cell onto the destination and empty the source.
    /// Legality is not checked.
    pub fn move_piece(&mut self, from: Square, to: Square) {
        let cell = self.piece_at(from);
        self.set(to, cell);
        self.clear(from);
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Copy of the board as the given side sees it: the cell at physical
    /// square `p` is the canonical cell at `to_canonical(p, color)`.
    pub fn render_perspective(&self, color: PieceColor) -> Board {
        let mut rendered = Board::empty();
        for sq in Square::ALL {
            rendered.set(sq, self.piece_at(to_canonical(sq, color)));
        }
        rendered
    }

    /// 64-character encoding, `' '` for empty cells
    pub fn to_layout(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.map_or(' ', Piece::to_char))
            .collect()
    }

    /// Parse a 64-character layout. Returns the offending character on
    /// anything that is not a piece letter or a space.
    pub fn from_layout(layout: &str) -> Result<Board, LayoutError> {
        let count = layout.chars().count();
        if count != CELLS {
            return Err(LayoutError::Length(count));
        }
        let mut board = Board::empty();
        for (i, c) in layout.chars().enumerate() {
            board.cells[i] = match c {
                ' ' => None,
                _ => Some(Piece::from_char(c).ok_or(LayoutError::Cell(c))?),
            };
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LayoutError {
    Length(usize),
    Cell(char),
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(8) {
            let line: String = row
                .iter()
                .map(|cell| cell.map_or('.', Piece::to_char))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
