//! User service implementation.

use crate::cache::TaggedCache;
use crate::dto::{CreatedResource, RegisterRequest, UserUpdateRequest};
use crate::listing::{CachedList, USER_LIST};
use crate::user_service::UserService;
use async_trait::async_trait;
use libris_core::{
    serialize_one, ApiVersion, LibrisError, LibrisResult, PageQuery, SerializationContext, User,
    UserId, ValidateExt, USER_GROUP,
};
use libris_repository::UserRepository;
use libris_security::PasswordHasherInterface;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// User service backed by a repository, a password hasher and the list cache.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasherInterface>,
    list: CachedList<User>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        cache: Arc<dyn TaggedCache>,
        list_ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            list: CachedList::new(USER_LIST, cache, list_ttl),
        }
    }

    fn render(user: &User, version: Option<ApiVersion>) -> LibrisResult<String> {
        let context = SerializationContext::with_groups(&[USER_GROUP]).version(version);
        serialize_one(user, &context)
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn list_users(&self, query: PageQuery, version: ApiVersion) -> LibrisResult<String> {
        let repository = Arc::clone(&self.user_repository);
        self.list
            .fetch(query, Some(version), |page| async move {
                repository.find_all_with_pagination(page).await
            })
            .await
    }

    async fn get_user(&self, id: UserId, version: ApiVersion) -> LibrisResult<String> {
        debug!("Getting user: {}", id);

        let user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| LibrisError::not_found("User", id))?;

        Self::render(&user, Some(version))
    }

    async fn register(&self, request: RegisterRequest) -> LibrisResult<CreatedResource> {
        request.validate_request()?;

        let email = request.email.unwrap_or_default();
        debug!("Registering user: {}", email);

        let password_hash = self
            .password_hasher
            .hash(&request.password.unwrap_or_default())?;
        let saved = self.user_repository.save(&User::new(email, password_hash)).await?;
        self.list.invalidate().await;

        info!("User registered: {}", saved.id);
        Ok(CreatedResource {
            id: saved.id.into_inner(),
            body: Self::render(&saved, None)?,
        })
    }

    async fn update_user(&self, id: UserId, request: UserUpdateRequest) -> LibrisResult<()> {
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let mut user = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| LibrisError::not_found("User", id))?;

        user.email = request.email.unwrap_or_default();
        user.password = self
            .password_hasher
            .hash(&request.password.unwrap_or_default())?;

        self.user_repository.update(&user).await?;
        self.list.invalidate().await;

        info!("User updated: {}", id);
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> LibrisResult<()> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.delete(id).await? {
            return Err(LibrisError::not_found("User", id));
        }
        self.list.invalidate().await;

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}
