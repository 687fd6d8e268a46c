//! # Libris Server Library
//!
//! Wiring and startup utilities for the Libris API binary.
//!
//! ```text
//! AppConfig ──▶ AppBuilder::build ──▶ App { router, cache, pool }
//!                                        │
//!                                        ├─ App::serve (axum, graceful shutdown)
//!                                        └─ spawn_cache_sweeper
//! ```

pub mod app;
pub mod startup;

pub use app::*;
pub use startup::*;
