//! API version extractor.

use crate::state::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::ACCEPT, request::Parts},
};
use libris_core::ApiVersion;
use std::convert::Infallible;

/// Serialization version requested through the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedVersion(pub ApiVersion);

#[async_trait]
impl FromRequestParts<AppState> for RequestedVersion {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let accept = parts.headers.get(ACCEPT).and_then(|h| h.to_str().ok());
        Ok(RequestedVersion(state.versions.resolve(accept)))
    }
}
