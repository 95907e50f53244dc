pub mod assets;
pub mod board_layout;
pub mod display;
pub mod render;
pub mod theme;
pub mod view_models;

pub use assets::PieceAssets;
pub use board_layout::BoardLayout;
pub use render::{BoardRenderer, SvgRenderer};
