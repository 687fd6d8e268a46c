//! Shared fixtures for REST integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use libris_config::{SecurityConfig, ServerConfig};
use libris_core::{Author, AuthorId, LibrisResult, PageRequest, Role, User, UserId};
use libris_repository::{AuthorRepository, InMemoryAuthorRepository, InMemoryUserRepository};
use libris_rest::{create_router, AppState};
use libris_security::{PasswordHasher, TokenProvider};
use libris_service::{
    AuthServiceImpl, AuthorServiceImpl, MemoryTaggedCache, UserServiceImpl, VersionResolver,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const BASE_URL: &str = "http://libris.test";

/// Author repository counting every call that reaches the store.
#[derive(Debug, Default)]
pub struct CountingAuthorRepository {
    inner: InMemoryAuthorRepository,
    calls: AtomicUsize,
}

impl CountingAuthorRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuthorRepository for CountingAuthorRepository {
    async fn find_by_id(&self, id: AuthorId) -> LibrisResult<Option<Author>> {
        self.hit();
        self.inner.find_by_id(id).await
    }

    async fn find_all_with_pagination(&self, page: PageRequest) -> LibrisResult<Vec<Author>> {
        self.hit();
        self.inner.find_all_with_pagination(page).await
    }

    async fn save(&self, author: &Author) -> LibrisResult<Author> {
        self.hit();
        self.inner.save(author).await
    }

    async fn update(&self, author: &Author) -> LibrisResult<Author> {
        self.hit();
        self.inner.update(author).await
    }

    async fn delete(&self, id: AuthorId) -> LibrisResult<bool> {
        self.hit();
        self.inner.delete(id).await
    }
}

/// A fully wired router over in-memory stores.
pub struct TestApp {
    pub router: Router,
    pub cache: Arc<MemoryTaggedCache>,
    pub authors: Arc<CountingAuthorRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub tokens: Arc<TokenProvider>,
}

/// A response with its body read to a string.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }
}

impl TestApp {
    pub fn new() -> Self {
        let cache = Arc::new(MemoryTaggedCache::new());
        let authors = Arc::new(CountingAuthorRepository::default());
        let users = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(PasswordHasher::with_memory_cost(1024));
        let tokens = Arc::new(TokenProvider::new(Arc::new(SecurityConfig {
            jwt_secret: "integration-test-secret".to_string(),
            ..SecurityConfig::default()
        })));
        let ttl = Duration::from_secs(60);

        let state = AppState::new(
            Arc::new(AuthorServiceImpl::new(authors.clone(), cache.clone(), ttl)),
            Arc::new(UserServiceImpl::new(users.clone(), hasher.clone(), cache.clone(), ttl)),
            Arc::new(AuthServiceImpl::new(users.clone(), hasher, tokens.clone())),
            VersionResolver::default(),
            BASE_URL,
        );

        Self {
            router: create_router(state, &ServerConfig::default()),
            cache,
            authors,
            users,
            tokens,
        }
    }

    pub fn token(&self, roles: Vec<Role>) -> String {
        let user = User::from_parts(UserId::new(1000), "tester@example.com", roles, "unused");
        self.tokens.generate_token(&user).expect("token").token
    }

    pub fn admin_token(&self) -> String {
        self.token(vec![Role::Admin])
    }

    pub fn user_token(&self) -> String {
        self.token(vec![Role::User])
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(request(Method::GET, uri, None, None, None)).await
    }

    pub async fn get_versioned(&self, uri: &str, version: &str) -> TestResponse {
        let accept = format!("application/json; version={version}");
        self.send(request(Method::GET, uri, None, None, Some(&accept))).await
    }

    pub async fn get_as(&self, uri: &str, token: &str, version: Option<&str>) -> TestResponse {
        let accept = version.map(|v| format!("application/json; version={v}"));
        self.send(request(Method::GET, uri, Some(token), None, accept.as_deref()))
            .await
    }

    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> TestResponse {
        self.send(request(method, uri, token, body, None)).await
    }
}

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<&str>,
    accept: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    if let Some(accept) = accept {
        builder = builder.header(header::ACCEPT, accept);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("valid request")
}
