//! User service trait definition.

use crate::dto::{CreatedResource, RegisterRequest, UserUpdateRequest};
use async_trait::async_trait;
use libris_core::{ApiVersion, LibrisResult, PageQuery, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Returns one page of users rendered for `version`, served from the
    /// cache when possible.
    async fn list_users(&self, query: PageQuery, version: ApiVersion) -> LibrisResult<String>;

    /// Returns a single user rendered for `version`. Never cached.
    async fn get_user(&self, id: UserId, version: ApiVersion) -> LibrisResult<String>;

    /// Registers a standard user with a hashed password.
    async fn register(&self, request: RegisterRequest) -> LibrisResult<CreatedResource>;

    /// Replaces the e-mail and password of an existing user.
    async fn update_user(&self, id: UserId, request: UserUpdateRequest) -> LibrisResult<()>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> LibrisResult<()>;
}
