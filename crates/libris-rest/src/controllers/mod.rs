//! REST API controllers.

pub mod auth_controller;
pub mod author_controller;
pub mod health_controller;
pub mod user_controller;

pub use health_controller::*;

use libris_core::LibrisError;

/// Parses a numeric path id. Anything else matches no resource.
pub(crate) fn parse_id(resource_type: &'static str, raw: &str) -> Result<i64, LibrisError> {
    raw.parse::<i64>()
        .map_err(|_| LibrisError::not_found(resource_type, raw))
}
