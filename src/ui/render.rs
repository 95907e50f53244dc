//! Board image rendering.
//!
//! The image is drawn from the local player's side of the board. Squares
//! and pieces go through [`BoardLayout`], so hit-testing a position on the
//! image and drawing it agree.

use shakmaty::Square;

use crate::domain::session::GameSession;
use crate::ui::assets::PieceAssets;
use crate::ui::board_layout::BoardLayout;
use crate::ui::theme::{BOARD_SIZE, hex, square_color};

/// Turns a session into image bytes
pub trait BoardRenderer {
    fn render(&self, session: &GameSession) -> Vec<u8>;
}

/// Renders the board as an SVG document
#[derive(Clone, Debug, Default)]
pub struct SvgRenderer {
    layout: BoardLayout,
    assets: PieceAssets,
}

impl SvgRenderer {
    pub fn new(assets: PieceAssets) -> Self {
        Self {
            layout: BoardLayout::default(),
            assets,
        }
    }

    fn square(&self, sq: Square, fill: &str) -> String {
        let (x, y) = self.layout.square_origin(sq);
        let size = self.layout.square_size();
        format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            x, y, size, size, fill
        )
    }

    fn image(&self, sq: Square, href: &str) -> String {
        let (x, y) = self.layout.square_origin(sq);
        let size = self.layout.square_size();
        format!(
            r#"<image href="{}" x="{}" y="{}" width="{}" height="{}"/>"#,
            href, x, y, size, size
        )
    }
}

impl BoardRenderer for SvgRenderer {
    fn render(&self, session: &GameSession) -> Vec<u8> {
        let rendered = session.board.render_perspective(session.color);
        let mut lines = vec![format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}">"#,
            BOARD_SIZE
        )];

        for row in 0..8 {
            for col in 0..8 {
                let Some(sq) = BoardLayout::square_at(row, col) else {
                    continue;
                };
                lines.push(self.square(sq, &hex(square_color(row, col))));
                if let Some(piece) = rendered.piece_at(sq) {
                    lines.push(self.image(sq, &self.assets.href(piece)));
                }
            }
        }

        lines.push("</svg>".to_string());
        let mut svg = lines.join("\n");
        svg.push('\n');
        svg.into_bytes()
    }
}
