//! MySQL user repository implementation.

use crate::{traits::UserRepository, DatabasePool};
use async_trait::async_trait;
use libris_core::{LibrisError, LibrisResult, PageRequest, Role, User, UserId};
use sqlx::types::Json;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL user repository implementation.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    email: String,
    roles: Json<Vec<Role>>,
    password: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::from_parts(UserId::new(row.id), row.email, row.roles.0, row.password)
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> LibrisResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, roles, password FROM users WHERE id = ?",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> LibrisResult<Option<User>> {
        debug!("Finding user by email: {}", email);

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, roles, password FROM users WHERE LOWER(email) = LOWER(?)",
        )
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_all_with_pagination(&self, page: PageRequest) -> LibrisResult<Vec<User>> {
        debug!("Finding users, page: {}, limit: {}", page.page(), page.limit());

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, roles, password
            FROM users
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(u64::from(page.limit()))
        .bind(page.offset())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn save(&self, user: &User) -> LibrisResult<User> {
        debug!("Saving new user: {}", user.email);

        // Duplicate e-mails surface as unique-key violations, mapped to Conflict.
        let result = sqlx::query("INSERT INTO users (email, roles, password) VALUES (?, ?, ?)")
            .bind(&user.email)
            .bind(Json(user.roles()))
            .bind(&user.password)
            .execute(self.pool.inner())
            .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| LibrisError::internal("User id out of range"))?;
        Ok(user.clone().with_id(UserId::new(id)))
    }

    async fn update(&self, user: &User) -> LibrisResult<User> {
        debug!("Updating user: {}", user.id);

        sqlx::query("UPDATE users SET email = ?, roles = ?, password = ? WHERE id = ?")
            .bind(&user.email)
            .bind(Json(user.roles()))
            .bind(&user.password)
            .bind(user.id.into_inner())
            .execute(self.pool.inner())
            .await?;

        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| LibrisError::not_found("User", user.id))
    }

    async fn delete(&self, id: UserId) -> LibrisResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
