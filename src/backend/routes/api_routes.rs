/**
 * API Routes
 *
 * # Public
 * - `GET /health` - Liveness probe
 * - `POST /signup` - User registration
 * - `GET /signup/{login}` - Login availability
 * - `POST /signin` - User login
 *
 * # Protected (bearer token)
 * - `GET /api/v1/current-user` - Caller's profile
 * - `GET /api/v1/users` - Search users by name prefix
 * - `PUT /api/v1/users` - Replace the caller's profile
 * - `GET /api/v1/users/{id}` - Any user's profile
 * - `DELETE /api/v1/users/{id}` - Delete the caller's account
 * - `GET /api/v1/friends` - Friends of a user
 * - `POST /api/v1/friends` - Add a friend
 * - `DELETE /api/v1/friends` - Remove a friend
 * - `GET /api/v1/friends/unknown` - Users that are not friends yet
 */

use axum::{
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::backend::auth::{check_login, get_current_user, signin, signup};
use crate::backend::friends::{add_friend, list_friends, list_unknown, remove_friend};
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::users::{delete_user, get_user, search_users, update_user};

/// Prefix of every guarded route
pub const API_PREFIX: &str = "/api/v1";

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Add the routes that need no token
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/health", get(health))
        .route("/signup", post(signup))
        .route("/signup/{login}", get(check_login))
        .route("/signin", post(signin))
}

/// Add the `/api/v1` routes behind the authentication middleware
///
/// The guard is attached with `route_layer`, so it only runs for requests
/// that match one of these routes; anything else falls through to the
/// router's 404.
pub fn configure_api_routes(router: Router<AppState>, state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/current-user", get(get_current_user))
        .route("/users", get(search_users).put(update_user))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .route(
            "/friends",
            get(list_friends).post(add_friend).delete(remove_friend),
        )
        .route("/friends/unknown", get(list_unknown))
        .route_layer(from_fn_with_state(state, auth_middleware));

    router.nest(API_PREFIX, protected)
}
