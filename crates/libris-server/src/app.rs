//! Application wiring.

use crate::startup::{print_startup_info, shutdown_signal};
use axum::Router;
use libris_config::{AppConfig, BootstrapAdminConfig};
use libris_core::{HealthCheck, LibrisError, LibrisResult, Role, User};
use libris_repository::{
    create_pool, AuthorRepository, DatabasePool, InMemoryAuthorRepository, InMemoryUserRepository,
    MySqlAuthorRepository, MySqlUserRepository, UserRepository,
};
use libris_rest::{create_router, AppState};
use libris_security::{PasswordHasher, PasswordHasherInterface, TokenProvider};
use libris_service::{
    AuthServiceImpl, AuthorServiceImpl, MemoryTaggedCache, TaggedCache, UserServiceImpl,
    VersionResolver,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Stores backing the services.
struct Repositories {
    authors: Arc<dyn AuthorRepository>,
    users: Arc<dyn UserRepository>,
    pool: Option<Arc<DatabasePool>>,
}

impl Repositories {
    async fn connect(config: &AppConfig) -> LibrisResult<Self> {
        if config.database.is_in_memory() {
            warn!("Using the in-memory store; data is lost on shutdown");
            return Ok(Self {
                authors: Arc::new(InMemoryAuthorRepository::new()),
                users: Arc::new(InMemoryUserRepository::new()),
                pool: None,
            });
        }

        let pool = create_pool(&config.database).await?;
        if config.database.run_migrations {
            pool.run_migrations().await?;
        }

        Ok(Self {
            authors: Arc::new(MySqlAuthorRepository::new(pool.clone())),
            users: Arc::new(MySqlUserRepository::new(pool.clone())),
            pool: Some(pool),
        })
    }

    fn health_checks(&self) -> Vec<Arc<dyn HealthCheck>> {
        self.pool
            .iter()
            .map(|pool| pool.clone() as Arc<dyn HealthCheck>)
            .collect()
    }
}

/// Application builder for constructing the server.
#[derive(Debug, Default)]
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    #[must_use]
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Connects the store and wires services, cache and router.
    pub async fn build(self) -> LibrisResult<App> {
        let config = self.config.unwrap_or_default();
        let versions = VersionResolver::from_config(&config.api)?;
        let repositories = Repositories::connect(&config).await?;

        let cache = Arc::new(MemoryTaggedCache::from_config(&config.cache));
        let hasher: Arc<dyn PasswordHasherInterface> = Arc::new(PasswordHasher::with_memory_cost(
            config.security.password_memory_cost_kib,
        ));
        let tokens = Arc::new(TokenProvider::new(Arc::new(config.security.clone())));
        let ttl = config.cache.list_ttl();

        if let Some(admin) = &config.bootstrap_admin {
            ensure_admin(repositories.users.as_ref(), hasher.as_ref(), admin).await?;
        }

        let state = AppState::new(
            Arc::new(AuthorServiceImpl::new(
                repositories.authors.clone(),
                cache.clone(),
                ttl,
            )),
            Arc::new(UserServiceImpl::new(
                repositories.users.clone(),
                hasher.clone(),
                cache.clone(),
                ttl,
            )),
            Arc::new(AuthServiceImpl::new(repositories.users.clone(), hasher, tokens)),
            versions,
            config.server.base_url(),
        )
        .with_max_page_size(config.api.max_page_size)
        .with_health_checks(repositories.health_checks());

        let router = create_router(state, &config.server);

        Ok(App {
            config,
            router,
            cache,
            pool: repositories.pool,
        })
    }
}

/// A wired application ready to serve.
pub struct App {
    config: AppConfig,
    router: Router,
    cache: Arc<MemoryTaggedCache>,
    pool: Option<Arc<DatabasePool>>,
}

impl App {
    /// Returns the configuration the application was built with.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns a handle to the HTTP router.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Returns the list cache.
    #[must_use]
    pub fn cache(&self) -> Arc<MemoryTaggedCache> {
        self.cache.clone()
    }

    /// Serves HTTP until a shutdown signal arrives, then releases resources.
    pub async fn serve(self) -> LibrisResult<()> {
        let addr = self.config.server.addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| LibrisError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        print_startup_info(&self.config.server);

        let sweeper = self
            .config
            .cache
            .sweep_interval()
            .filter(|_| self.cache.is_enabled())
            .map(|interval| spawn_cache_sweeper(self.cache.clone(), interval));

        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| LibrisError::Internal(format!("REST server error: {}", e)));

        if let Some(handle) = sweeper {
            handle.abort();
        }
        if let Some(pool) = &self.pool {
            pool.close().await;
        }

        info!("Server shutdown complete");
        result
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("addr", &self.config.server.addr())
            .field("cache_entries", &self.cache.len())
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

/// Creates the configured administrator, or grants the admin role to an
/// existing account with that e-mail.
pub async fn ensure_admin(
    users: &dyn UserRepository,
    hasher: &dyn PasswordHasherInterface,
    admin: &BootstrapAdminConfig,
) -> LibrisResult<User> {
    match users.find_by_email(&admin.email).await? {
        Some(user) if user.is_admin() => {
            debug!("Bootstrap admin {} already present", admin.email);
            Ok(user)
        }
        Some(mut user) => {
            let mut roles = user.roles().to_vec();
            roles.push(Role::Admin);
            user.set_roles(roles);
            let user = users.update(&user).await?;
            info!("Granted admin role to {}", user.email);
            Ok(user)
        }
        None => {
            let mut user = User::new(admin.email.clone(), hasher.hash(&admin.password)?);
            user.set_roles(vec![Role::Admin]);
            let user = users.save(&user).await?;
            info!("Created bootstrap admin {} (id {})", user.email, user.id);
            Ok(user)
        }
    }
}

/// Periodically drops expired and invalidated cache entries.
pub fn spawn_cache_sweeper(cache: Arc<dyn TaggedCache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = cache.purge_expired().await;
            if removed > 0 {
                debug!(removed, "Swept cache entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use libris_config::{ApiConfig, DatabaseConfig, SecurityConfig};
    use tower::ServiceExt;

    const ADMIN_EMAIL: &str = "admin@libris.test";
    const ADMIN_PASSWORD: &str = "s3cret-admin";

    fn memory_config() -> AppConfig {
        AppConfig {
            database: DatabaseConfig {
                url: "memory:".to_string(),
                ..DatabaseConfig::default()
            },
            security: SecurityConfig {
                jwt_secret: "app-test-secret".to_string(),
                password_memory_cost_kib: 1024,
                ..SecurityConfig::default()
            },
            bootstrap_admin: Some(BootstrapAdminConfig {
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            }),
            ..AppConfig::default()
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_app_builder_new() {
        let builder = AppBuilder::new();
        assert!(builder.config.is_none());
    }

    #[test]
    fn test_app_builder_with_config() {
        let builder = AppBuilder::new().with_config(memory_config());
        assert!(builder.config.is_some());
    }

    #[tokio::test]
    async fn test_build_rejects_bad_default_version() {
        let config = AppConfig {
            api: ApiConfig {
                default_version: "one".to_string(),
                ..ApiConfig::default()
            },
            ..memory_config()
        };
        let err = AppBuilder::new().with_config(config).build().await.unwrap_err();
        assert!(matches!(err, LibrisError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_bootstrap_admin_can_log_in_and_manage_authors() {
        let app = AppBuilder::new().with_config(memory_config()).build().await.unwrap();

        let login = Request::builder()
            .method(Method::POST)
            .uri("/api/login_check")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::json!({"username": ADMIN_EMAIL, "password": ADMIN_PASSWORD})
                    .to_string(),
            ))
            .unwrap();
        let response = app.router().oneshot(login).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let token = body_json(response).await["token"].as_str().unwrap().to_string();

        let create = Request::builder()
            .method(Method::POST)
            .uri("/api/authors")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"last_name":"Tolstoy"}"#))
            .unwrap();
        let response = app.router().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[header::LOCATION],
            "http://localhost:8080/api/authors/1"
        );
    }

    #[tokio::test]
    async fn test_ready_without_database_checks() {
        let app = AppBuilder::new().with_config(memory_config()).build().await.unwrap();
        let request = Request::builder().uri("/ready").body(Body::empty()).unwrap();
        let response = app.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn test_ensure_admin_creates_account() {
        let users = InMemoryUserRepository::new();
        let hasher = PasswordHasher::with_memory_cost(1024);
        let admin = BootstrapAdminConfig {
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        };

        let created = ensure_admin(&users, &hasher, &admin).await.unwrap();
        assert!(created.is_admin());
        assert!(hasher.verify(ADMIN_PASSWORD, &created.password).unwrap());

        // A second run leaves the account alone.
        let again = ensure_admin(&users, &hasher, &admin).await.unwrap();
        assert_eq!(again.id, created.id);
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_admin_promotes_existing_user() {
        let users = InMemoryUserRepository::new();
        let hasher = PasswordHasher::with_memory_cost(1024);
        let existing = users.save(&User::new(ADMIN_EMAIL, "kept-hash")).await.unwrap();
        assert!(!existing.is_admin());

        let admin = BootstrapAdminConfig {
            email: ADMIN_EMAIL.to_string(),
            password: "ignored".to_string(),
        };
        let promoted = ensure_admin(&users, &hasher, &admin).await.unwrap();
        assert_eq!(promoted.id, existing.id);
        assert!(promoted.is_admin());
        assert_eq!(promoted.password, "kept-hash");
    }

    #[tokio::test]
    async fn test_sweeper_purges_expired_entries() {
        let cache = Arc::new(MemoryTaggedCache::new());
        let versions = cache.tag_versions(&["authorsCache"]).await;
        cache
            .insert("authors-1-3", "[]".into(), Duration::from_millis(1), versions)
            .await;
        assert_eq!(cache.len(), 1);

        let handle = spawn_cache_sweeper(cache.clone(), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(60)).await;
        handle.abort();

        assert!(cache.is_empty());
    }
}
