/**
 * Current User Handler
 *
 * `GET /api/v1/current-user` returns the profile of the authenticated
 * caller. The guard has already resolved the token to a stored user.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::users::find_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::shared::social::User;

/// Get current user handler
pub async fn get_current_user(
    State(pool): State<SqlitePool>,
    AuthUser(caller): AuthUser,
) -> Result<Json<User>, BackendError> {
    let user = find_user_by_id(&pool, caller.id).await?;
    Ok(Json(user))
}
