//! # Libris Security
//!
//! Security module for the Libris API providing JWT authentication,
//! password hashing, and role checks.

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::*;
pub use password::*;
pub use rbac::*;
