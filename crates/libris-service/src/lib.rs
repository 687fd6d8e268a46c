//! # Libris Service
//!
//! Business logic service layer for the Libris API.
//!
//! List endpoints are served through a tag-invalidated response cache:
//!
//! ```text
//! list request → CachedList::fetch → build_key → TaggedCache::get_or_compute
//!                                                  hit  → stored payload
//!                                                  miss → repository + serialization
//! mutation     → repository write → TaggedCache::invalidate_tags
//! ```

pub mod auth_service;
pub mod author_service;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod listing;
pub mod user_service;
pub mod versioning;

pub use auth_service::*;
pub use author_service::*;
pub use cache::*;
pub use dto::*;
pub use listing::*;
pub use r#impl::*;
pub use user_service::*;
pub use versioning::*;
