//! Author controller.

use super::parse_id;
use crate::{
    extractors::{decode_body, AuthenticatedUser, Pagination},
    responses::{created, no_content, ok, ApiResult},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use libris_core::{AuthorId, LibrisError};
use libris_security::{messages, ClaimsExt};
use libris_service::AuthorRequest;
use tracing::debug;

/// Creates the author router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authors", get(list_authors).post(create_author))
        .route(
            "/authors/:id",
            get(get_author).put(update_author).delete(delete_author),
        )
}

fn author_id(raw: &str) -> Result<AuthorId, LibrisError> {
    parse_id("Author", raw).map(AuthorId::new)
}

/// List authors, one cached page at a time.
async fn list_authors(
    State(state): State<AppState>,
    Pagination(query): Pagination,
) -> ApiResult {
    debug!("List authors request");

    let body = state.author_service.list_authors(query).await?;
    Ok(ok(body))
}

/// Get an author by ID.
async fn get_author(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    debug!("Get author request: {}", id);

    let body = state.author_service.get_author(author_id(&id)?).await?;
    Ok(ok(body))
}

/// Create an author (admin only).
async fn create_author(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    body: Bytes,
) -> ApiResult {
    user.require_admin(messages::CREATE_AUTHOR)?;

    let request: AuthorRequest = decode_body(&body)?;
    let created_author = state.author_service.create_author(request).await?;

    let location = state.absolute_url(&format!("/api/authors/{}", created_author.id));
    created(&location, created_author.body)
}

/// Replace an author (admin only).
async fn update_author(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<StatusCode> {
    user.require_admin(messages::UPDATE_AUTHOR)?;

    let id = author_id(&id)?;
    let request: AuthorRequest = decode_body(&body)?;
    state.author_service.update_author(id, request).await?;
    Ok(no_content())
}

/// Delete an author (admin only).
async fn delete_author(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    user.require_admin(messages::DELETE_AUTHOR)?;

    state.author_service.delete_author(author_id(&id)?).await?;
    Ok(no_content())
}
