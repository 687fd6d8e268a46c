//! Domain entities and value objects for the Libris API.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
