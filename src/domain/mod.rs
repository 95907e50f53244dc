pub mod board;
pub mod chess;
pub mod codec;
pub mod notation;
pub mod perspective;
pub mod protocol;
pub mod session;
pub mod special;

pub use board::Board;
pub use chess::{Piece, PieceColor, PieceKind};
pub use notation::{GesturePolicy, MoveDescriptor};
pub use protocol::{GameStatus, MoveConfirmation};
pub use session::GameSession;
