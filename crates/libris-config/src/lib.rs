//! # Libris Config
//!
//! Configuration management for the Libris API.
//! Supports layered configuration from files, environment variables,
//! and runtime reload.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
