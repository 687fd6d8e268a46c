//! Repository trait definitions.

use async_trait::async_trait;
use libris_core::{Author, AuthorId, LibrisResult, PageRequest, User, UserId};

/// Author repository trait.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Finds an author by ID.
    async fn find_by_id(&self, id: AuthorId) -> LibrisResult<Option<Author>>;

    /// Returns one page of authors ordered by ID ascending.
    async fn find_all_with_pagination(&self, page: PageRequest) -> LibrisResult<Vec<Author>>;

    /// Saves a new author and returns it with its assigned ID.
    async fn save(&self, author: &Author) -> LibrisResult<Author>;

    /// Updates an existing author.
    async fn update(&self, author: &Author) -> LibrisResult<Author>;

    /// Deletes an author by ID. Returns false when no author matched.
    async fn delete(&self, id: AuthorId) -> LibrisResult<bool>;
}

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> LibrisResult<Option<User>>;

    /// Finds a user by e-mail (case-insensitive).
    async fn find_by_email(&self, email: &str) -> LibrisResult<Option<User>>;

    /// Returns one page of users ordered by ID ascending.
    async fn find_all_with_pagination(&self, page: PageRequest) -> LibrisResult<Vec<User>>;

    /// Saves a new user and returns it with its assigned ID.
    ///
    /// Fails with `Conflict` when the e-mail is already taken.
    async fn save(&self, user: &User) -> LibrisResult<User>;

    /// Updates an existing user.
    ///
    /// Fails with `Conflict` when the new e-mail belongs to another user.
    async fn update(&self, user: &User) -> LibrisResult<User>;

    /// Deletes a user by ID. Returns false when no user matched.
    async fn delete(&self, id: UserId) -> LibrisResult<bool>;
}
