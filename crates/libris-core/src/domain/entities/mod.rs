//! Domain entities.

mod author;
mod user;

pub use author::*;
pub use user::*;
