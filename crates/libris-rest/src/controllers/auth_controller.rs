//! Authentication controller.

use crate::{
    extractors::decode_body,
    middleware::bearer_token,
    responses::ApiResult,
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use libris_service::{LoginRequest, LoginResponse};
use serde_json::json;
use tracing::debug;

/// Creates the authentication router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login_check", post(login_check))
        .route("/decode", get(decode))
}

/// Exchange credentials for a token.
async fn login_check(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<LoginResponse>> {
    let request: LoginRequest = decode_body(&body)?;
    let response = state.auth_service.login(request).await?;
    Ok(Json(response))
}

/// Decode the bearer token of the request and return its claims.
async fn decode(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token);

    let Some(token) = token else {
        return invalid_token();
    };

    match state.auth_service.decode(token).await {
        Ok(claims) => Json(claims).into_response(),
        Err(e) => {
            debug!("Decode rejected: {}", e);
            invalid_token()
        }
    }
}

fn invalid_token() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid token"}))).into_response()
}
