//! API response types.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use libris_core::{ErrorResponse, LibrisError};
use tracing::error;

/// Application error type for Axum.
///
/// Validation failures render as a bare list of violations; every other
/// error renders as an [`ErrorResponse`].
#[derive(Debug)]
pub struct AppError(pub LibrisError);

impl From<LibrisError> for AppError {
    fn from(err: LibrisError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        match &self.0 {
            LibrisError::Validation(violations) => (status, Json(violations)).into_response(),
            err => (status, Json(ErrorResponse::from_error(err))).into_response(),
        }
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T = Response> = Result<T, AppError>;

/// Responds with an already serialized JSON document.
pub fn raw_json(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}

/// Helper to create a success (200) response from serialized JSON.
pub fn ok(body: String) -> Response {
    raw_json(StatusCode::OK, body)
}

/// Helper to create a created (201) response pointing at `location`.
pub fn created(location: &str, body: String) -> ApiResult {
    let location = HeaderValue::from_str(location)
        .map_err(|e| LibrisError::internal(format!("Invalid Location header: {}", e)))?;
    let mut response = raw_json(StatusCode::CREATED, body);
    response.headers_mut().insert(header::LOCATION, location);
    Ok(response)
}

/// Helper to create a no content (204) response.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::Violation;

    #[test]
    fn test_status_mapping() {
        let response = AppError(LibrisError::forbidden("nope")).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = AppError(LibrisError::Validation(vec![Violation::new("a", "b")])).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError(LibrisError::Database("down".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_created_sets_location() {
        let response = created("http://localhost/api/authors/1", "{}".into()).unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[header::LOCATION],
            "http://localhost/api/authors/1"
        );
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }
}
