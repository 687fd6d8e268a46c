//! Main application router.

use crate::{
    controllers::{auth_controller, author_controller, health_controller, user_controller},
    middleware::{auth_middleware, logging_middleware, AuthMiddlewareState},
    state::AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use libris_config::ServerConfig;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Creates the main application router.
///
/// API routes live under `/api`; health endpoints sit at the root.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let auth_state = AuthMiddlewareState::new(state.auth_service.clone());

    let api_router = Router::new()
        .merge(author_controller::router())
        .merge(user_controller::router())
        .merge(auth_controller::router())
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let mut router = Router::new()
        .merge(health_controller::router())
        .nest("/api", api_router)
        .route("/", get(root))
        .with_state(state)
        .layer(DefaultBodyLimit::max(server_config.max_body_size))
        .layer(CompressionLayer::new());

    if let Some(cors) = create_cors_layer(server_config) {
        router = router.layer(cors);
    }

    let router = router
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints under /api");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> Option<CorsLayer> {
    if !server_config.cors_enabled {
        return None;
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Libris API"
}
