//! In-memory author repository.

use crate::traits::AuthorRepository;
use async_trait::async_trait;
use libris_core::{Author, AuthorId, LibrisError, LibrisResult, PageRequest};
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Store {
    rows: BTreeMap<AuthorId, Author>,
    last_id: i64,
}

/// Author repository keeping rows in process memory.
///
/// IDs are assigned sequentially starting at 1, like an auto-increment column.
#[derive(Debug, Default)]
pub struct InMemoryAuthorRepository {
    store: RwLock<Store>,
}

impl InMemoryAuthorRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with the given authors.
    #[must_use]
    pub fn with_authors(authors: impl IntoIterator<Item = Author>) -> Self {
        let repo = Self::new();
        {
            let mut store = repo.store.write();
            for author in authors {
                store.last_id += 1;
                let id = AuthorId::new(store.last_id);
                store.rows.insert(id, author.with_id(id));
            }
        }
        repo
    }

    /// Returns the number of stored authors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read().rows.len()
    }

    /// Returns true when no author is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuthorRepository for InMemoryAuthorRepository {
    async fn find_by_id(&self, id: AuthorId) -> LibrisResult<Option<Author>> {
        Ok(self.store.read().rows.get(&id).cloned())
    }

    async fn find_all_with_pagination(&self, page: PageRequest) -> LibrisResult<Vec<Author>> {
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        Ok(self
            .store
            .read()
            .rows
            .values()
            .skip(offset)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn save(&self, author: &Author) -> LibrisResult<Author> {
        let mut store = self.store.write();
        store.last_id += 1;
        let saved = author.clone().with_id(AuthorId::new(store.last_id));
        store.rows.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, author: &Author) -> LibrisResult<Author> {
        let mut store = self.store.write();
        match store.rows.get_mut(&author.id) {
            Some(row) => {
                *row = author.clone();
                Ok(author.clone())
            }
            None => Err(LibrisError::not_found("Author", author.id)),
        }
    }

    async fn delete(&self, id: AuthorId) -> LibrisResult<bool> {
        Ok(self.store.write().rows.remove(&id).is_some())
    }
}
