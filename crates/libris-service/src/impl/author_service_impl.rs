//! Author service implementation.

use crate::author_service::AuthorService;
use crate::cache::TaggedCache;
use crate::dto::{AuthorRequest, CreatedResource};
use crate::listing::{CachedList, AUTHOR_LIST};
use async_trait::async_trait;
use libris_core::{
    serialize_one, Author, AuthorId, LibrisError, LibrisResult, PageQuery, SerializationContext,
    ValidateExt, AUTHOR_GROUP,
};
use libris_repository::AuthorRepository;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Author service backed by a repository and the list cache.
pub struct AuthorServiceImpl {
    author_repository: Arc<dyn AuthorRepository>,
    list: CachedList<Author>,
}

impl AuthorServiceImpl {
    /// Creates a new author service.
    pub fn new(
        author_repository: Arc<dyn AuthorRepository>,
        cache: Arc<dyn TaggedCache>,
        list_ttl: Duration,
    ) -> Self {
        Self {
            author_repository,
            list: CachedList::new(AUTHOR_LIST, cache, list_ttl),
        }
    }

    fn render(author: &Author) -> LibrisResult<String> {
        serialize_one(author, &SerializationContext::with_groups(&[AUTHOR_GROUP]))
    }
}

#[async_trait]
impl AuthorService for AuthorServiceImpl {
    async fn list_authors(&self, query: PageQuery) -> LibrisResult<String> {
        let repository = Arc::clone(&self.author_repository);
        self.list
            .fetch(query, None, |page| async move {
                repository.find_all_with_pagination(page).await
            })
            .await
    }

    async fn get_author(&self, id: AuthorId) -> LibrisResult<String> {
        debug!("Getting author: {}", id);

        let author = self
            .author_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| LibrisError::not_found("Author", id))?;

        Self::render(&author)
    }

    async fn create_author(&self, request: AuthorRequest) -> LibrisResult<CreatedResource> {
        request.validate_request()?;

        let saved = self.author_repository.save(&request.into_author()).await?;
        self.list.invalidate().await;

        info!("Author created: {}", saved.id);
        Ok(CreatedResource {
            id: saved.id.into_inner(),
            body: Self::render(&saved)?,
        })
    }

    async fn update_author(&self, id: AuthorId, request: AuthorRequest) -> LibrisResult<()> {
        debug!("Updating author: {}", id);

        request.validate_request()?;

        let mut author = self
            .author_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| LibrisError::not_found("Author", id))?;

        request.apply_to(&mut author);
        self.author_repository.update(&author).await?;
        self.list.invalidate().await;

        info!("Author updated: {}", id);
        Ok(())
    }

    async fn delete_author(&self, id: AuthorId) -> LibrisResult<()> {
        debug!("Deleting author: {}", id);

        if !self.author_repository.delete(id).await? {
            return Err(LibrisError::not_found("Author", id));
        }
        self.list.invalidate().await;

        info!("Author deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for AuthorServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorServiceImpl")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}
