//! Data Transfer Objects (DTOs).

mod auth_dto;
mod author_dto;
mod user_dto;

pub use auth_dto::*;
pub use author_dto::*;
pub use user_dto::*;

/// Outcome of a successful create operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedResource {
    /// Identifier assigned by the store.
    pub id: i64,
    /// Rendered JSON of the created entity.
    pub body: String,
}
