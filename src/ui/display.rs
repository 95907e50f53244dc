//! Display generation for the move list, board and caption.
//!
//! This module transforms session state into display-ready text.
//! It lives in the UI layer and depends on domain, not vice versa.

use shakmaty::{File, Rank, Square};

use crate::domain::perspective::to_canonical;
use crate::domain::session::GameSession;
use crate::ui::view_models::MoveListEntry;

/// Pair up history entries into numbered moves
pub fn move_list(history: &[String]) -> Vec<MoveListEntry> {
    history
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| MoveListEntry {
            move_num: i + 1,
            white: pair[0].clone(),
            black: pair.get(1).cloned(),
        })
        .collect()
}

/// `1. e4 e5` style move list, one move per line
pub fn format_move_list(entries: &[MoveListEntry]) -> String {
    entries
        .iter()
        .map(|entry| match &entry.black {
            Some(black) => format!("{}. {} {}", entry.move_num, entry.white, black),
            None => format!("{}. {}", entry.move_num, entry.white),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Board as the local player sees it, with rank and file labels
pub fn board_text(session: &GameSession) -> String {
    let color = session.color;
    let rendered = session.board.render_perspective(color);
    let mut out = String::new();

    for rank in Rank::ALL.into_iter().rev() {
        let label = to_canonical(Square::from_coords(File::A, rank), color).rank();
        out.push(label.char());
        out.push(' ');
        for file in File::ALL {
            let cell = rendered.piece_at(Square::from_coords(file, rank));
            out.push(cell.map_or('.', |piece| piece.to_char()));
        }
        out.push('\n');
    }

    out.push_str("  ");
    for file in File::ALL {
        let label = to_canonical(Square::from_coords(file, Rank::First), color).file();
        out.push(label.char());
    }
    out
}

/// What to show under the board
pub fn status_line(session: &GameSession) -> String {
    match (&session.caption, &session.result) {
        (Some(caption), _) => caption.clone(),
        (None, Some(result)) => format!("Game over {}", result),
        (None, None) if session.is_complete => "Game over".to_string(),
        (None, None) => "Your move".to_string(),
    }
}
