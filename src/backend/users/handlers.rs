/**
 * User Profile Handlers
 *
 * Read, search, update and delete user profiles under `/api/v1/users`.
 * Reads are open to any authenticated caller; writes only to the owner of
 * the record.
 */

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::backend::auth::users;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::shared::social::{User, UserSummary};

/// Query string for `GET /api/v1/users`
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// `GET /api/v1/users/{id}`
pub async fn get_user(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<User>, BackendError> {
    let Path(id) = id?;
    Ok(Json(users::find_user_by_id(&pool, id).await?))
}

/// `GET /api/v1/users?search=<prefix>`
pub async fn search_users(
    State(pool): State<SqlitePool>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    let Query(query) = query?;
    let found = users::search_users(&pool, query.search.as_deref().unwrap_or_default()).await?;
    Ok(Json(found))
}

/// `PUT /api/v1/users`
///
/// Replaces the caller's profile. The body must carry the caller's own id
/// (403 otherwise) and unchanged login (400 otherwise).
pub async fn update_user(
    State(pool): State<SqlitePool>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<Json<User>, BackendError> {
    let Json(user) = payload?;
    caller.ensure_owns(user.id)?;

    let updated = users::update_user(&pool, &user).await?;
    tracing::info!("Updated profile of user {}", updated.id);
    Ok(Json(updated))
}

/// `DELETE /api/v1/users/{id}`
///
/// Only the user themselves may delete their account. Their relationships
/// go with it.
pub async fn delete_user(
    State(pool): State<SqlitePool>,
    AuthUser(caller): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, BackendError> {
    let Path(id) = id?;
    caller.ensure_owns(id)?;

    users::delete_user(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
