//! Theme constants and colors for the rendered board.

// Layout constants
pub const BOARD_SIZE: f32 = 300.0;
pub const SQUARE_SIZE: f32 = 36.0;
pub const BOARD_TOP_OFFSET: f32 = 10.0;

// Board colors
pub const LIGHT_SQUARE: u32 = 0xFFCE9E;
pub const DARK_SQUARE: u32 = 0xD18B47;

/// Get the color for a board square based on its position
pub fn square_color(row: usize, col: usize) -> u32 {
    if (row + col) % 2 == 0 {
        LIGHT_SQUARE
    } else {
        DARK_SQUARE
    }
}

/// CSS form of a color, e.g. `#FFCE9E`
pub fn hex(color: u32) -> String {
    format!("#{:06X}", color)
}
