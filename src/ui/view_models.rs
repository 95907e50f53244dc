//! View models for displaying the game.
//!
//! These types are DTOs (Data Transfer Objects) that prepare session state
//! for display. They live in the UI layer, not the domain layer.

/// One numbered line of the move list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveListEntry {
    pub move_num: usize,
    pub white: String,
    pub black: Option<String>,
}
