//! Application state for Axum handlers.

use libris_core::HealthCheck;
use libris_service::{AuthService, AuthorService, UserService, VersionResolver};
use std::sync::Arc;

/// Page size cap used when none is configured.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 1000;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub author_service: Arc<dyn AuthorService>,
    pub user_service: Arc<dyn UserService>,
    pub auth_service: Arc<dyn AuthService>,
    pub versions: VersionResolver,
    public_url: Arc<str>,
    max_page_size: u32,
    health_checks: Arc<[Arc<dyn HealthCheck>]>,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// `public_url` is the absolute base used for `Location` headers.
    pub fn new(
        author_service: Arc<dyn AuthorService>,
        user_service: Arc<dyn UserService>,
        auth_service: Arc<dyn AuthService>,
        versions: VersionResolver,
        public_url: &str,
    ) -> Self {
        Self {
            author_service,
            user_service,
            auth_service,
            versions,
            public_url: Arc::from(public_url.trim_end_matches('/')),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            health_checks: Arc::from(Vec::new()),
        }
    }

    /// Registers the checks reported by the readiness endpoint.
    #[must_use]
    pub fn with_health_checks(mut self, checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        self.health_checks = Arc::from(checks);
        self
    }

    /// Caps the `limit` accepted by list endpoints.
    #[must_use]
    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size.max(1);
        self
    }

    /// Returns the largest accepted `limit`.
    #[must_use]
    pub const fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    /// Returns the registered health checks.
    #[must_use]
    pub fn health_checks(&self) -> &[Arc<dyn HealthCheck>] {
        &self.health_checks
    }

    /// Returns the absolute URL of an API path.
    #[must_use]
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.public_url, path)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("versions", &self.versions)
            .field("public_url", &self.public_url)
            .field("max_page_size", &self.max_page_size)
            .field("health_checks", &self.health_checks.len())
            .finish_non_exhaustive()
    }
}
