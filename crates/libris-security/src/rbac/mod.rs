//! Role based access checks.

mod checker;

pub use checker::*;
