/**
 * Signup Handlers
 *
 * `POST /signup` registers a user and signs them in straight away.
 * `GET /signup/{login}` lets a client check whether a login is free before
 * submitting the form.
 *
 * # Validation
 *
 * - The body must be JSON with every required field present (400)
 * - Login, password and both names must not be blank (400)
 * - The login must be unused (409)
 */

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Json, Response},
};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::AuthResponse;
use crate::backend::auth::users::{login_exists, register_user};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::social::{LoginExists, SignupRequest};

/// Sign up handler
///
/// # Returns
///
/// `201 Created` with the bearer header and `{token, user}`.
///
/// # Example Request
///
/// ```http
/// POST /signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "login": "alice",
///   "password": "wonderland",
///   "firstName": "Alice",
///   "lastName": "Liddell",
///   "birthDay": "1990-05-04",
///   "city": "Oxford"
/// }
/// ```
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Response, BackendError> {
    let Json(request) = payload?;
    tracing::info!("Signup request for login: {}", request.login);

    let user = register_user(&state.db_pool, &state.credentials, &request)
        .await
        .map_err(|e| {
            tracing::warn!("Signup for '{}' failed: {}", request.login, e);
            e
        })?;

    let response = AuthResponse::issue(&state.tokens, user)?;
    tracing::info!("User created successfully: {} ({})", response.user.login, response.user.id);

    Ok(response.with_status(StatusCode::CREATED))
}

/// Login availability check
pub async fn check_login(
    State(pool): State<SqlitePool>,
    Path(login): Path<String>,
) -> Result<Json<LoginExists>, BackendError> {
    let exists = login_exists(&pool, &login).await?;
    Ok(Json(LoginExists { exists }))
}
