//! Response caching for the service layer.
//!
//! Cached payloads are associated with invalidation tags. Each tag carries a
//! version that is bumped on invalidation; an entry is only served while every
//! tag version it was computed under is still current.

pub mod cache_keys;
mod memory_cache;
mod tagged_cache;

pub use cache_keys::{build_key, tags, ListName};
pub use memory_cache::{names, MemoryTaggedCache};
pub use tagged_cache::{TagVersion, TaggedCache, TaggedCacheExt};
