//! Cached, paginated list rendering.

use crate::cache::{build_key, cache_keys, tags, ListName, TaggedCache, TaggedCacheExt};
use libris_core::{
    serialize_many, ApiVersion, Exposed, LibrisResult, PageQuery, PageRequest,
    SerializationContext, AUTHOR_GROUP, USER_GROUP,
};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Static description of a cached list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSpec {
    /// First segment of every cache key of the list.
    pub name: ListName,
    /// Invalidation tag attached to every cached page.
    pub tag: &'static str,
    /// Page size used when the request names none.
    pub default_limit: u32,
    /// Serialization group rendered for each row.
    pub group: &'static str,
    /// Whether the API version takes part in the key and the rendering.
    pub versioned: bool,
}

/// The author list: three per page, version independent.
pub const AUTHOR_LIST: ListSpec = ListSpec {
    name: cache_keys::AUTHORS,
    tag: tags::AUTHORS,
    default_limit: 3,
    group: AUTHOR_GROUP,
    versioned: false,
};

/// The user list: a hundred per page, rendered per API version.
pub const USER_LIST: ListSpec = ListSpec {
    name: cache_keys::USERS,
    tag: tags::USERS,
    default_limit: 100,
    group: USER_GROUP,
    versioned: true,
};

/// A list endpoint whose rendered pages are kept in a [`TaggedCache`].
pub struct CachedList<R> {
    spec: ListSpec,
    cache: Arc<dyn TaggedCache>,
    ttl: Duration,
    _rows: PhantomData<fn() -> R>,
}

impl<R: Exposed + Send> CachedList<R> {
    /// Creates a cached list.
    #[must_use]
    pub fn new(spec: ListSpec, cache: Arc<dyn TaggedCache>, ttl: Duration) -> Self {
        Self {
            spec,
            cache,
            ttl,
            _rows: PhantomData,
        }
    }

    /// Returns the list description.
    #[must_use]
    pub const fn spec(&self) -> &ListSpec {
        &self.spec
    }

    /// Returns the cache key of a page. The version is ignored for
    /// unversioned lists.
    #[must_use]
    pub fn key(&self, page: PageRequest, version: Option<ApiVersion>) -> String {
        let version = version
            .filter(|_| self.spec.versioned)
            .map(|v| v.to_string());
        build_key(self.spec.name, page.page(), page.limit(), version.as_deref())
    }

    /// Returns the rendered page for `query`, loading rows through `load` on
    /// a cache miss. The version is ignored for unversioned lists.
    pub async fn fetch<F, Fut>(
        &self,
        query: PageQuery,
        version: Option<ApiVersion>,
        load: F,
    ) -> LibrisResult<String>
    where
        F: FnOnce(PageRequest) -> Fut + Send,
        Fut: Future<Output = LibrisResult<Vec<R>>> + Send,
    {
        let page = query.resolve(self.spec.default_limit);
        let version = version.filter(|_| self.spec.versioned);
        let key = self.key(page, version);
        let context = SerializationContext::with_groups(&[self.spec.group]).version(version);
        debug!(list = self.spec.name.as_str(), key = %key, "Fetching list page");

        self.cache
            .get_or_compute(&key, self.ttl, &[self.spec.tag], move || async move {
                let rows = load(page).await?;
                serialize_many(&rows, &context)
            })
            .await
    }

    /// Makes every cached page of the list unservable.
    pub async fn invalidate(&self) {
        self.cache.invalidate_tags(&[self.spec.tag]).await;
    }
}

impl<R> std::fmt::Debug for CachedList<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedList")
            .field("spec", &self.spec)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
