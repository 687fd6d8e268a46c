//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use libris_service::AuthService;
use std::sync::Arc;
use tracing::debug;

const BEARER_PREFIX: &str = "bearer ";

/// Authentication middleware state.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub auth_service: Arc<dyn AuthService>,
}

impl AuthMiddlewareState {
    /// Creates a new middleware state.
    pub fn new(auth_service: Arc<dyn AuthService>) -> Self {
        Self { auth_service }
    }
}

/// Returns the token of a `Bearer` authorization value.
///
/// The scheme is matched case-insensitively.
#[must_use]
pub fn bearer_token(header: &str) -> Option<&str> {
    let prefix = header.get(..BEARER_PREFIX.len())?;
    prefix
        .eq_ignore_ascii_case(BEARER_PREFIX)
        .then(|| header[BEARER_PREFIX.len()..].trim())
        .filter(|token| !token.is_empty())
}

/// Authentication middleware that validates JWT tokens.
///
/// Valid claims are added to the request extensions. Invalid or missing
/// tokens are not rejected here; handlers requiring a role fail with 401
/// through the `AuthenticatedUser` extractor.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string);

    if let Some(token) = token {
        match state.auth_service.decode(&token).await {
            Ok(claims) => {
                debug!("Authenticated user: {}", claims.username);
                request.extensions_mut().insert(claims);
            }
            Err(e) => {
                debug!("Token validation failed: {}", e);
            }
        }
    }

    next.run(request).await
}
