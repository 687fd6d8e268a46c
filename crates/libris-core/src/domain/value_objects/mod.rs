//! Domain value objects.

mod role;

pub use role::*;
