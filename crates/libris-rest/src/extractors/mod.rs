//! Custom Axum extractors.

mod body;
mod claims;
mod pagination;
mod version;

pub use body::*;
pub use claims::*;
pub use pagination::*;
pub use version::*;
