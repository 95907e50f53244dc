pub mod authority;
pub mod game;
pub mod link;

pub use authority::{Authority, HttpAuthority};
pub use game::{GameModel, ModelUpdate, RevertReason};
pub use link::AuthorityLink;
