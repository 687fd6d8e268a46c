//! Author service trait definition.

use crate::dto::{AuthorRequest, CreatedResource};
use async_trait::async_trait;
use libris_core::{AuthorId, LibrisResult, PageQuery};

/// Author service trait.
///
/// Read operations return rendered JSON. Every successful write invalidates
/// the cached author pages before returning.
#[async_trait]
pub trait AuthorService: Send + Sync {
    /// Returns one page of authors, served from the cache when possible.
    async fn list_authors(&self, query: PageQuery) -> LibrisResult<String>;

    /// Returns a single author. Never cached.
    async fn get_author(&self, id: AuthorId) -> LibrisResult<String>;

    /// Validates and stores a new author.
    async fn create_author(&self, request: AuthorRequest) -> LibrisResult<CreatedResource>;

    /// Replaces both names of an existing author.
    async fn update_author(&self, id: AuthorId, request: AuthorRequest) -> LibrisResult<()>;

    /// Deletes an author.
    async fn delete_author(&self, id: AuthorId) -> LibrisResult<()>;
}
