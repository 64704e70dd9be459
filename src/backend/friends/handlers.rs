/**
 * Friend Handlers
 *
 * List, add and remove friendships under `/api/v1/friends`.
 *
 * # Ownership
 *
 * Listings may target any user through `?id=`, defaulting to the caller.
 * Adding or removing an edge requires `userId` to be the caller.
 */

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::friends::db;
use crate::backend::middleware::auth::AuthUser;
use crate::shared::social::{Relationship, UserSummary};

/// Query string for the friend listings
#[derive(Debug, Default, Deserialize)]
pub struct FriendsQuery {
    /// User whose friends are listed; the caller when absent
    #[serde(default)]
    pub id: Option<i64>,
    /// Case-insensitive first or last name prefix
    #[serde(default)]
    pub search: Option<String>,
}

/// `GET /api/v1/friends`
pub async fn list_friends(
    State(pool): State<SqlitePool>,
    AuthUser(caller): AuthUser,
    query: Result<Query<FriendsQuery>, QueryRejection>,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    let Query(query) = query?;
    let user_id = query.id.unwrap_or(caller.id);

    let friends = db::friends_of(&pool, user_id, query.search.as_deref()).await?;
    Ok(Json(friends))
}

/// `GET /api/v1/friends/unknown`
pub async fn list_unknown(
    State(pool): State<SqlitePool>,
    AuthUser(caller): AuthUser,
    query: Result<Query<FriendsQuery>, QueryRejection>,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    let Query(query) = query?;
    let user_id = query.id.unwrap_or(caller.id);

    let strangers = db::unconnected_users(&pool, user_id, query.search.as_deref()).await?;
    Ok(Json(strangers))
}

/// `POST /api/v1/friends`
///
/// # Errors
///
/// * `403 Forbidden` - `userId` is not the caller
/// * `400 Bad Request` - `userId` equals `friendId`
/// * `404 Not Found` - `friendId` does not exist
/// * `409 Conflict` - already friends
pub async fn add_friend(
    State(pool): State<SqlitePool>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<Relationship>, JsonRejection>,
) -> Result<(StatusCode, Json<Relationship>), BackendError> {
    let Json(edge) = payload?;
    caller.ensure_owns(edge.user_id)?;

    db::add_edge(&pool, edge).await?;
    Ok((StatusCode::CREATED, Json(edge)))
}

/// `DELETE /api/v1/friends`
pub async fn remove_friend(
    State(pool): State<SqlitePool>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<Relationship>, JsonRejection>,
) -> Result<Json<Relationship>, BackendError> {
    let Json(edge) = payload?;
    caller.ensure_owns(edge.user_id)?;

    db::remove_edge(&pool, edge).await?;
    Ok(Json(edge))
}
