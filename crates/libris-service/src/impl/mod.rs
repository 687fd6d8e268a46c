//! Service implementations.
//!
//! This module contains the concrete implementations of service traits.
//! Trait definitions live in the parent module (e.g. `user_service.rs`).

pub mod author_service_impl;
pub mod user_service_impl;

pub use author_service_impl::AuthorServiceImpl;
pub use user_service_impl::UserServiceImpl;
