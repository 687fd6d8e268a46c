//! User controller.

use super::parse_id;
use crate::{
    extractors::{decode_body, AuthenticatedUser, Pagination, RequestedVersion},
    responses::{created, no_content, ok, ApiResult},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use libris_core::{LibrisError, Role, UserId};
use libris_security::{messages, ClaimsExt};
use libris_service::{RegisterRequest, UserUpdateRequest};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/register", post(register))
}

fn user_id(raw: &str) -> Result<UserId, LibrisError> {
    parse_id("User", raw).map(UserId::new)
}

/// List users (admin only), rendered for the requested API version.
async fn list_users(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    RequestedVersion(version): RequestedVersion,
    Pagination(query): Pagination,
) -> ApiResult {
    user.require_admin(messages::LIST_USERS)?;
    debug!("List users request, version {}", version);

    let body = state.user_service.list_users(query, version).await?;
    Ok(ok(body))
}

/// Get a user by ID.
async fn get_user(
    State(state): State<AppState>,
    RequestedVersion(version): RequestedVersion,
    Path(id): Path<String>,
) -> ApiResult {
    debug!("Get user request: {}", id);

    let body = state.user_service.get_user(user_id(&id)?, version).await?;
    Ok(ok(body))
}

/// Register a standard user. Anonymous.
async fn register(State(state): State<AppState>, body: Bytes) -> ApiResult {
    let request: RegisterRequest = decode_body(&body)?;
    let registered = state.user_service.register(request).await?;

    let location = state.absolute_url(&format!("/api/users/{}", registered.id));
    created(&location, registered.body)
}

/// Replace a user's e-mail and password.
async fn update_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<StatusCode> {
    user.require_role(Role::User, messages::UPDATE_USER)?;

    let id = user_id(&id)?;
    let request: UserUpdateRequest = decode_body(&body)?;
    state.user_service.update_user(id, request).await?;
    Ok(no_content())
}

/// Delete a user (admin only).
async fn delete_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    user.require_admin(messages::DELETE_USER)?;

    state.user_service.delete_user(user_id(&id)?).await?;
    Ok(no_content())
}
