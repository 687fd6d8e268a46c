//! # Libris REST
//!
//! REST API layer using Axum for the Libris API.
//! Provides HTTP endpoints for authors, users, authentication, and health checks.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
