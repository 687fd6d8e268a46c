//! In-process repository implementations.

mod author_repository;
mod user_repository;

pub use author_repository::*;
pub use user_repository::*;
