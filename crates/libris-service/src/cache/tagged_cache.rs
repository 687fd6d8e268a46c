//! Tag-aware cache interface.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// Version of a tag observed at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagVersion {
    /// Tag name.
    pub tag: String,
    /// Version counter of the tag.
    pub version: u64,
}

impl TagVersion {
    /// Creates a new tag version.
    #[must_use]
    pub fn new(tag: impl Into<String>, version: u64) -> Self {
        Self {
            tag: tag.into(),
            version,
        }
    }
}

/// Cache mapping keys to serialized payloads, each entry tagged for bulk
/// invalidation.
///
/// Payloads are stored as strings so the trait stays object safe.
#[async_trait]
pub trait TaggedCache: Send + Sync {
    /// Returns the payload stored under `key` if it is still servable.
    async fn lookup(&self, key: &str) -> Option<String>;

    /// Returns the current version of each tag.
    async fn tag_versions(&self, tags: &[&str]) -> Vec<TagVersion>;

    /// Stores a payload computed while the given tag versions were current.
    ///
    /// An entry whose versions are already outdated is never served.
    async fn insert(&self, key: &str, payload: String, ttl: Duration, versions: Vec<TagVersion>);

    /// Makes every entry tagged with any of `tags` unservable.
    async fn invalidate_tags(&self, tags: &[&str]);

    /// Drops expired and invalidated entries. Returns the number removed.
    async fn purge_expired(&self) -> usize;

    /// Returns false when the cache stores nothing.
    fn is_enabled(&self) -> bool;
}

/// Read-through helpers available on every [`TaggedCache`].
#[async_trait]
pub trait TaggedCacheExt: TaggedCache {
    /// Returns the live payload for `key`, or runs `compute` once and stores
    /// its result under `tags` for `ttl`.
    ///
    /// Errors from `compute` propagate unchanged and are never stored.
    async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        tags: &[&str],
        compute: F,
    ) -> Result<String, E>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<String, E>> + Send,
        E: Send,
    {
        if !self.is_enabled() {
            return compute().await;
        }

        if let Some(payload) = self.lookup(key).await {
            return Ok(payload);
        }

        // Versions are captured before computing so a concurrent invalidation
        // leaves the stored entry unservable.
        let versions = self.tag_versions(tags).await;
        let payload = compute().await?;
        self.insert(key, payload.clone(), ttl, versions).await;
        Ok(payload)
    }
}

impl<T: TaggedCache + ?Sized> TaggedCacheExt for T {}
