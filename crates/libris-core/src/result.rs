//! Result type aliases for Libris.

use crate::LibrisError;

/// A specialized `Result` type for Libris operations.
pub type LibrisResult<T> = Result<T, LibrisError>;
