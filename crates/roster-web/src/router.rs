//! Main application router.

use crate::{
    controllers::{health_controller, user_controller},
    flash::USERS_PATH,
    middleware::logging_middleware,
    state::AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::Redirect,
    routing::get,
    Router,
};
use roster_config::ServerConfig;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the main application router.
///
/// User pages live under `/users`; `/` redirects there. Health endpoints are
/// mounted at the root.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let router = Router::new()
        .route("/", get(root))
        .nest(USERS_PATH, user_controller::router())
        .merge(health_controller::router())
        .layer(DefaultBodyLimit::max(server_config.max_body_size))
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(timeout_layer(server_config.request_timeout()))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    info!("Router created with user pages at {}", USERS_PATH);
    router
}

/// Aborts requests that run past `timeout` with 408 Request Timeout.
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Root endpoint handler.
async fn root() -> Redirect {
    Redirect::to(USERS_PATH)
}
