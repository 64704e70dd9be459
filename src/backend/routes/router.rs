/**
 * Main Router
 *
 * Assembles public and protected routes, static files, the JSON 404
 * fallback and the cross-cutting layers into one router.
 *
 * # Layers (outermost first)
 *
 * 1. `TraceLayer` - one span per request
 * 2. `CorsLayer` - any origin, the methods and headers browsers need
 * 3. `TimeoutLayer` - `408 Request Timeout` once the deadline passes
 */

use axum::{
    http::{
        header::{
            ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, IF_MODIFIED_SINCE,
        },
        HeaderName, Method, StatusCode,
    },
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::{configure_api_routes, configure_public_routes};
use crate::backend::server::state::AppState;
use crate::shared::config::ServerSettings;

const X_CSRF_TOKEN: HeaderName = HeaderName::from_static("x-csrf-token");

/// CORS policy for browser clients
///
/// Credentials are not allowed: tower-http refuses to combine them with a
/// wildcard origin, and tokens travel in the `Authorization` header anyway.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            ACCEPT,
            CONTENT_TYPE,
            CONTENT_LENGTH,
            ACCEPT_ENCODING,
            X_CSRF_TOKEN,
            AUTHORIZATION,
            IF_MODIFIED_SINCE,
        ])
        .expose_headers([AUTHORIZATION])
}

/// Per-request deadline; a request still running at the deadline gets 408
pub fn timeout_layer(settings: &ServerSettings) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, settings.request_timeout())
}

/// Create the application router
pub fn create_router(app_state: AppState, settings: &ServerSettings) -> Router<()> {
    let router = configure_public_routes(Router::new());
    let router = configure_api_routes(router, app_state.clone());

    let router = router
        .nest_service("/static", ServeDir::new(&settings.static_dir))
        .fallback(|| async { BackendError::not_found("route") });

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer())
                .layer(timeout_layer(settings)),
        )
        .with_state(app_state)
}
