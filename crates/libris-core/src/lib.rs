//! # Libris Core
//!
//! Core types, traits, and error definitions for the Libris API.
//! Every other crate in the workspace builds on the abstractions defined here:
//! the unified error type, typed identifiers, pagination parameters, the
//! author and user entities, and the group/version aware JSON projection.

pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod serialization;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use serialization::*;
pub use traits::*;
pub use validation::*;
