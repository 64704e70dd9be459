//! Database operations for relationships
//!
//! A friendship is stored as two directed rows in `friends`, one per
//! direction, so "friends of X" is a single indexed lookup. Both rows are
//! written and removed in one transaction; the graph never holds only one
//! direction of an edge.

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::backend::auth::users::{conflict_on_unique, like_prefix, MAX_RESULTS};
use crate::backend::error::BackendError;
use crate::backend::server::config::begin_write;
use crate::shared::social::{Relationship, UserSummary};

/// Users connected to `user_id`, optionally filtered by a name prefix
pub async fn friends_of(
    pool: &SqlitePool,
    user_id: i64,
    search: Option<&str>,
) -> Result<Vec<UserSummary>, BackendError> {
    let pattern = like_prefix(search.unwrap_or_default());

    let friends = sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT u.id, u.first_name, u.last_name, u.city
        FROM friends f
        INNER JOIN users u ON u.id = f.friend_id
        WHERE f.user_id = ?
          AND (u.first_name_lower LIKE ? ESCAPE '\' OR u.last_name_lower LIKE ? ESCAPE '\')
        ORDER BY u.id
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(&pattern)
    .bind(&pattern)
    .bind(MAX_RESULTS)
    .fetch_all(pool)
    .await?;

    Ok(friends)
}

/// Users that are neither `user_id` nor connected to it
///
/// Results are marked new so clients can offer to add them.
pub async fn unconnected_users(
    pool: &SqlitePool,
    user_id: i64,
    search: Option<&str>,
) -> Result<Vec<UserSummary>, BackendError> {
    let pattern = like_prefix(search.unwrap_or_default());

    let mut users = sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT u.id, u.first_name, u.last_name, u.city
        FROM users u
        WHERE u.id <> ?
          AND u.id NOT IN (SELECT f.friend_id FROM friends f WHERE f.user_id = ?)
          AND (u.first_name_lower LIKE ? ESCAPE '\' OR u.last_name_lower LIKE ? ESCAPE '\')
        ORDER BY u.id
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .bind(&pattern)
    .bind(&pattern)
    .bind(MAX_RESULTS)
    .fetch_all(pool)
    .await?;

    for user in &mut users {
        user.is_new = true;
    }
    Ok(users)
}

/// Whether the directed row `user_id -> friend_id` exists
pub async fn are_friends(pool: &SqlitePool, user_id: i64, friend_id: i64) -> Result<bool, BackendError> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM friends WHERE user_id = ? AND friend_id = ?")
            .bind(user_id)
            .bind(friend_id)
            .fetch_one(pool)
            .await?;

    Ok(count > 0)
}

async fn ensure_user_exists(tx: &mut Transaction<'_, Sqlite>, id: i64) -> Result<(), BackendError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?")
        .bind(id)
        .fetch_one(&mut **tx)
        .await?;

    if count == 0 {
        return Err(BackendError::not_found(format!("user {}", id)));
    }
    Ok(())
}

/// Create the edge between `edge.user_id` and `edge.friend_id`
///
/// # Errors
/// * `SharedError` - both ids are the same user
/// * `NotFound` - either user does not exist
/// * `Conflict` - the edge already exists
pub async fn add_edge(pool: &SqlitePool, edge: Relationship) -> Result<(), BackendError> {
    edge.validate()?;

    let mut tx = begin_write(pool).await?;
    ensure_user_exists(&mut tx, edge.user_id).await?;
    ensure_user_exists(&mut tx, edge.friend_id).await?;

    for row in [edge, edge.reversed()] {
        sqlx::query("INSERT INTO friends (user_id, friend_id) VALUES (?, ?)")
            .bind(row.user_id)
            .bind(row.friend_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| conflict_on_unique(e, "users are already friends"))?;
    }

    tx.commit().await?;
    tracing::info!("Added friendship {} <-> {}", edge.user_id, edge.friend_id);
    Ok(())
}

/// Remove the edge between `edge.user_id` and `edge.friend_id`
///
/// # Errors
/// * `NotFound` - no row existed in either direction
pub async fn remove_edge(pool: &SqlitePool, edge: Relationship) -> Result<(), BackendError> {
    let mut tx = begin_write(pool).await?;

    let mut removed = 0;
    for row in [edge, edge.reversed()] {
        removed += sqlx::query("DELETE FROM friends WHERE user_id = ? AND friend_id = ?")
            .bind(row.user_id)
            .bind(row.friend_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }

    match removed {
        0 => {
            return Err(BackendError::not_found(format!(
                "friendship {} <-> {}",
                edge.user_id, edge.friend_id
            )))
        }
        1 => tracing::warn!(
            "Removed half-present friendship {} <-> {}",
            edge.user_id,
            edge.friend_id
        ),
        _ => {}
    }

    tx.commit().await?;
    tracing::info!("Removed friendship {} <-> {}", edge.user_id, edge.friend_id);
    Ok(())
}
