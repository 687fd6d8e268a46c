//! MySQL author repository implementation.

use crate::{traits::AuthorRepository, DatabasePool};
use async_trait::async_trait;
use libris_core::{Author, AuthorId, LibrisError, LibrisResult, PageRequest};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL author repository implementation.
#[derive(Clone)]
pub struct MySqlAuthorRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlAuthorRepository {
    /// Creates a new MySQL author repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of an author.
#[derive(Debug, FromRow)]
struct AuthorRow {
    id: i64,
    first_name: Option<String>,
    last_name: String,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: AuthorId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

#[async_trait]
impl AuthorRepository for MySqlAuthorRepository {
    async fn find_by_id(&self, id: AuthorId) -> LibrisResult<Option<Author>> {
        debug!("Finding author by id: {}", id);

        let row = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, first_name, last_name FROM authors WHERE id = ?",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Author::from))
    }

    async fn find_all_with_pagination(&self, page: PageRequest) -> LibrisResult<Vec<Author>> {
        debug!("Finding authors, page: {}, limit: {}", page.page(), page.limit());

        let rows = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, first_name, last_name
            FROM authors
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(u64::from(page.limit()))
        .bind(page.offset())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn save(&self, author: &Author) -> LibrisResult<Author> {
        debug!("Saving new author: {}", author.last_name);

        let result = sqlx::query("INSERT INTO authors (first_name, last_name) VALUES (?, ?)")
            .bind(&author.first_name)
            .bind(&author.last_name)
            .execute(self.pool.inner())
            .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| LibrisError::internal("Author id out of range"))?;
        Ok(author.clone().with_id(AuthorId::new(id)))
    }

    async fn update(&self, author: &Author) -> LibrisResult<Author> {
        debug!("Updating author: {}", author.id);

        sqlx::query("UPDATE authors SET first_name = ?, last_name = ? WHERE id = ?")
            .bind(&author.first_name)
            .bind(&author.last_name)
            .bind(author.id.into_inner())
            .execute(self.pool.inner())
            .await?;

        self.find_by_id(author.id)
            .await?
            .ok_or_else(|| LibrisError::not_found("Author", author.id))
    }

    async fn delete(&self, id: AuthorId) -> LibrisResult<bool> {
        debug!("Deleting author: {}", id);

        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlAuthorRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlAuthorRepository").finish_non_exhaustive()
    }
}
