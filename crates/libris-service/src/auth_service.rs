//! Authentication service implementation.

use crate::dto::{LoginRequest, LoginResponse};
use async_trait::async_trait;
use libris_core::{LibrisError, LibrisResult};
use libris_repository::UserRepository;
use libris_security::{Claims, PasswordHasherInterface, TokenProvider};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges e-mail and password for a signed access token.
    async fn login(&self, request: LoginRequest) -> LibrisResult<LoginResponse>;

    /// Validates an access token and returns its claims.
    async fn decode(&self, token: &str) -> LibrisResult<Claims>;
}

/// Authentication service implementation.
pub struct AuthServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasherInterface>,
    token_provider: Arc<TokenProvider>,
}

impl AuthServiceImpl {
    /// Creates a new authentication service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        token_provider: Arc<TokenProvider>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, request: LoginRequest) -> LibrisResult<LoginResponse> {
        debug!("Login attempt for: {}", request.username);

        let user = match self.user_repository.find_by_email(&request.username).await? {
            Some(user) => user,
            None => {
                warn!("Login failed: unknown user {}", request.username);
                return Err(LibrisError::InvalidCredentials);
            }
        };

        if !self.password_hasher.verify(&request.password, &user.password)? {
            warn!("Login failed: wrong password for user {}", user.id);
            return Err(LibrisError::InvalidCredentials);
        }

        let issued = self.token_provider.generate_token(&user)?;
        info!("User logged in: {}", user.id);
        Ok(LoginResponse {
            token: issued.token,
        })
    }

    async fn decode(&self, token: &str) -> LibrisResult<Claims> {
        self.token_provider.validate_token(token)
    }
}

impl std::fmt::Debug for AuthServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceImpl")
            .field("token_provider", &self.token_provider)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_config::SecurityConfig;
    use libris_core::{Role, User, UserId};
    use libris_repository::InMemoryUserRepository;
    use libris_security::PasswordHasher;

    async fn service() -> AuthServiceImpl {
        let hasher = Arc::new(PasswordHasher::with_memory_cost(1024));
        let users = InMemoryUserRepository::new();
        let mut admin = User::new("admin@example.com", hasher.hash("s3cret").unwrap());
        admin.set_roles(vec![Role::Admin]);
        users.save(&admin).await.unwrap();

        let config = SecurityConfig {
            jwt_secret: "auth-service-test-secret".to_string(),
            ..SecurityConfig::default()
        };
        AuthServiceImpl::new(
            Arc::new(users),
            hasher,
            Arc::new(TokenProvider::new(Arc::new(config))),
        )
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_and_decode() {
        let service = service().await;
        let response = service.login(login("admin@example.com", "s3cret")).await.unwrap();

        let claims = service.decode(&response.token).await.unwrap();
        assert_eq!(claims.username, "admin@example.com");
        assert_eq!(claims.user_id(), Some(UserId::new(1)));
        assert_eq!(claims.roles, vec![Role::User, Role::Admin]);
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let err = service()
            .await
            .login(login("admin@example.com", "guess"))
            .await
            .unwrap_err();
        assert!(matches!(err, LibrisError::InvalidCredentials));
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let err = service()
            .await
            .login(login("ghost@example.com", "s3cret"))
            .await
            .unwrap_err();
        assert!(matches!(err, LibrisError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_decode_garbage() {
        let err = service().await.decode("not.a.jwt").await.unwrap_err();
        assert_eq!(err.status_code(), 401);
    }
}
