//! In-process tagged cache backed by concurrent maps.

use super::{TagVersion, TaggedCache};
use async_trait::async_trait;
use dashmap::DashMap;
use libris_config::CacheConfig;
use metrics::counter;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::debug;

/// Metric names emitted by the cache.
pub mod names {
    /// Lookups answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "libris_cache_hits_total";
    /// Lookups that found no servable entry.
    pub const CACHE_MISSES_TOTAL: &str = "libris_cache_misses_total";
    /// Tag invalidations, labelled by tag.
    pub const CACHE_INVALIDATIONS_TOTAL: &str = "libris_cache_invalidations_total";
}

/// Expiry used when `now + ttl` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365);

#[derive(Debug)]
struct CacheEntry {
    payload: String,
    versions: Vec<TagVersion>,
    expires_at: Instant,
}

/// Tagged cache held in process memory.
///
/// Entries, tag versions and the tag → keys index live in separate
/// [`DashMap`]s, so readers never contend on a global lock. No code path holds
/// an `entries` guard while acquiring a `tag_index` guard.
#[derive(Debug)]
pub struct MemoryTaggedCache {
    entries: DashMap<String, CacheEntry>,
    tag_versions: DashMap<String, u64>,
    tag_index: DashMap<String, HashSet<String>>,
    enabled: bool,
}

impl MemoryTaggedCache {
    /// Creates an empty, enabled cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            tag_versions: DashMap::new(),
            tag_index: DashMap::new(),
            enabled: true,
        }
    }

    /// Creates a cache that stores nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Creates a cache honouring `cache.enabled`.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        if config.enabled {
            Self::new()
        } else {
            Self::disabled()
        }
    }

    /// Returns the number of stored entries, servable or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no entry is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn current_version(&self, tag: &str) -> u64 {
        self.tag_versions.get(tag).map_or(0, |v| *v)
    }

    fn is_live(&self, entry: &CacheEntry, now: Instant) -> bool {
        now < entry.expires_at
            && entry
                .versions
                .iter()
                .all(|tv| self.current_version(&tv.tag) == tv.version)
    }
}

impl Default for MemoryTaggedCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaggedCache for MemoryTaggedCache {
    async fn lookup(&self, key: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let now = Instant::now();
        let hit = self
            .entries
            .get(key)
            .and_then(|entry| self.is_live(&entry, now).then(|| entry.payload.clone()));

        if hit.is_some() {
            debug!(key, "Cache hit");
            counter!(names::CACHE_HITS_TOTAL).increment(1);
        } else {
            debug!(key, "Cache miss");
            counter!(names::CACHE_MISSES_TOTAL).increment(1);
            self.entries.remove_if(key, |_, entry| !self.is_live(entry, now));
        }
        hit
    }

    async fn tag_versions(&self, tags: &[&str]) -> Vec<TagVersion> {
        tags.iter()
            .map(|tag| TagVersion::new(*tag, self.current_version(tag)))
            .collect()
    }

    async fn insert(&self, key: &str, payload: String, ttl: Duration, versions: Vec<TagVersion>) {
        if !self.enabled {
            return;
        }

        let now = Instant::now();
        let entry = CacheEntry {
            payload,
            versions,
            expires_at: now.checked_add(ttl).unwrap_or(now + FAR_FUTURE),
        };
        if !self.is_live(&entry, now) {
            debug!(key, "Discarding entry invalidated while it was computed");
            return;
        }

        let tags: Vec<String> = entry.versions.iter().map(|tv| tv.tag.clone()).collect();
        self.entries.insert(key.to_string(), entry);
        for tag in tags {
            self.tag_index.entry(tag).or_default().insert(key.to_string());
        }
    }

    async fn invalidate_tags(&self, tags: &[&str]) {
        for tag in tags {
            *self.tag_versions.entry((*tag).to_string()).or_insert(0) += 1;
            counter!(names::CACHE_INVALIDATIONS_TOTAL, "tag" => (*tag).to_string()).increment(1);

            let now = Instant::now();
            if let Some(mut keys) = self.tag_index.get_mut(*tag) {
                keys.retain(|key| {
                    self.entries.remove_if(key, |_, entry| !self.is_live(entry, now));
                    self.entries.contains_key(key)
                });
            }
            debug!(tag, "Invalidated cache tag");
        }
    }

    async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| self.is_live(entry, now));
        let removed = before.saturating_sub(self.entries.len());

        self.tag_index.retain(|_, keys| {
            keys.retain(|key| self.entries.contains_key(key));
            !keys.is_empty()
        });

        if removed > 0 {
            debug!(removed, "Purged cache entries");
        }
        removed
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TaggedCacheExt;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const TTL: Duration = Duration::from_secs(60);

    async fn fetch(
        cache: &MemoryTaggedCache,
        key: &str,
        tags: &[&str],
        calls: &AtomicUsize,
        value: &str,
    ) -> String {
        cache
            .get_or_compute(key, TTL, tags, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>(value.to_string())
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_hit_avoids_recompute() {
        let cache = MemoryTaggedCache::new();
        let calls = AtomicUsize::new(0);

        assert_eq!(fetch(&cache, "authors-1-3", &["authorsCache"], &calls, "[1]").await, "[1]");
        assert_eq!(fetch(&cache, "authors-1-3", &["authorsCache"], &calls, "[2]").await, "[1]");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidation_only_affects_tagged_entries() {
        let cache = MemoryTaggedCache::new();
        let calls = AtomicUsize::new(0);
        fetch(&cache, "authors-1-3", &["authorsCache"], &calls, "a").await;
        fetch(&cache, "users-1-100-1.0", &["usersCache"], &calls, "u").await;

        cache.invalidate_tags(&["authorsCache"]).await;

        assert!(cache.lookup("authors-1-3").await.is_none());
        assert_eq!(cache.lookup("users-1-100-1.0").await.as_deref(), Some("u"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_invalidation_is_idempotent() {
        let cache = MemoryTaggedCache::new();
        let calls = AtomicUsize::new(0);
        fetch(&cache, "k", &["t"], &calls, "v1").await;

        cache.invalidate_tags(&["t"]).await;
        cache.invalidate_tags(&["t"]).await;
        cache.invalidate_tags(&["unknown"]).await;

        assert_eq!(fetch(&cache, "k", &["t"], &calls, "v2").await, "v2");
        assert_eq!(fetch(&cache, "k", &["t"], &calls, "v3").await, "v2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_is_a_miss() {
        let cache = MemoryTaggedCache::new();
        let calls = AtomicUsize::new(0);
        for _ in 0..2 {
            cache
                .get_or_compute("k", Duration::ZERO, &["t"], || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, Infallible>("v".to_string())
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache = MemoryTaggedCache::new();
        let err = cache
            .get_or_compute("k", TTL, &["t"], || async { Err::<String, _>("store down") })
            .await
            .unwrap_err();
        assert_eq!(err, "store down");
        assert!(cache.is_empty());

        let calls = AtomicUsize::new(0);
        assert_eq!(fetch(&cache, "k", &["t"], &calls, "ok").await, "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidation_during_compute_is_not_served() {
        let cache = Arc::new(MemoryTaggedCache::new());
        let racing = Arc::clone(&cache);

        let first = cache
            .get_or_compute("k", TTL, &["t"], || async move {
                racing.invalidate_tags(&["t"]).await;
                Ok::<_, Infallible>("stale".to_string())
            })
            .await
            .unwrap();
        assert_eq!(first, "stale");
        assert!(cache.lookup("k").await.is_none());

        let calls = AtomicUsize::new(0);
        assert_eq!(fetch(&cache, "k", &["t"], &calls, "fresh").await, "fresh");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_recomputes() {
        let cache = MemoryTaggedCache::disabled();
        let calls = AtomicUsize::new(0);
        fetch(&cache, "k", &["t"], &calls, "v").await;
        fetch(&cache, "k", &["t"], &calls, "v").await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_insert_with_outdated_versions_is_dropped() {
        let cache = MemoryTaggedCache::new();
        let versions = cache.tag_versions(&["t"]).await;
        cache.invalidate_tags(&["t"]).await;
        cache.insert("k", "v".into(), TTL, versions).await;
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_entry_with_multiple_tags() {
        let cache = MemoryTaggedCache::new();
        let calls = AtomicUsize::new(0);
        fetch(&cache, "k", &["a", "b"], &calls, "v").await;

        cache.invalidate_tags(&["b"]).await;
        assert!(cache.lookup("k").await.is_none());
    }

    #[tokio::test]
    async fn test_purge_removes_expired_entries() {
        let cache = MemoryTaggedCache::new();
        let versions = cache.tag_versions(&["t"]).await;
        cache
            .insert("old", "x".into(), Duration::from_millis(1), versions.clone())
            .await;
        cache.insert("new", "y".into(), TTL, versions).await;
        assert_eq!(cache.len(), 2);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup("new").await.as_deref(), Some("y"));
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        };
        assert!(!MemoryTaggedCache::from_config(&config).is_enabled());
        assert!(MemoryTaggedCache::from_config(&CacheConfig::default()).is_enabled());
    }
}
