//! Piece image locations.

use crate::domain::chess::Piece;

pub const DEFAULT_ASSET_BASE: &str = "assets/pieces";

/// Where piece images live, e.g. `assets/pieces/knight_black.svg`
#[derive(Clone, Debug)]
pub struct PieceAssets {
    base: String,
}

impl PieceAssets {
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn href(&self, piece: Piece) -> String {
        format!("{}/{}.svg", self.base, piece.resource_name())
    }
}

impl Default for PieceAssets {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chess::{PieceColor, PieceKind};

    #[test]
    fn test_href() {
        let assets = PieceAssets::new("static/img/");
        let piece = Piece::new(PieceKind::Knight, PieceColor::Black);
        assert_eq!(assets.href(piece), "static/img/knight_black.svg");
    }

    #[test]
    fn test_default_base() {
        let piece = Piece::new(PieceKind::King, PieceColor::White);
        assert_eq!(
            PieceAssets::default().href(piece),
            "assets/pieces/king_white.svg"
        );
    }
}
