//! JWT claims extractor.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use libris_core::LibrisError;
use libris_security::Claims;

/// Extractor for authenticated user claims.
///
/// The claims are placed in the request extensions by the auth middleware
/// when the bearer token is valid.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl std::ops::Deref for AuthenticatedUser {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(AuthenticatedUser(claims.clone()));
        }

        let message = if parts.headers.contains_key(AUTHORIZATION) {
            "Invalid or expired token"
        } else {
            "Missing authorization header"
        };
        Err(AppError(LibrisError::unauthorized(message)))
    }
}
