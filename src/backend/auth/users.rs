/**
 * User Repository
 *
 * This module handles user records: lookup, search, registration, profile
 * updates, deletion and credential checks. Every multi-statement write runs
 * inside a transaction; returning early with `?` drops the transaction and
 * rolls it back.
 */

use sqlx::SqlitePool;

use crate::backend::auth::password::CredentialStore;
use crate::backend::error::BackendError;
use crate::backend::server::config::begin_write;
use crate::shared::social::{Credentials, SignupRequest, User, UserSummary};
use crate::shared::SharedError;

/// Upper bound on rows returned by any listing query
pub const MAX_RESULTS: i64 = 100;

/// User row including the stored password hash. Never leaves the backend.
#[derive(sqlx::FromRow)]
struct UserRecord {
    #[sqlx(flatten)]
    user: User,
    password: String,
}

/// Build a case-insensitive `LIKE` prefix pattern, escaping wildcards
///
/// Matched with `ESCAPE '\'` against the `*_name_lower` columns, which hold
/// [`fold_name`] of each name. An empty prefix matches everything.
pub fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in fold_name(prefix.trim()).chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case folding applied to stored names and to search prefixes
///
/// Full Unicode lowercasing; SQLite's own `LOWER()` only handles ASCII.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Turn a unique-constraint violation into `Conflict`, anything else into `Store`
pub(crate) fn conflict_on_unique(err: sqlx::Error, message: &str) -> BackendError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => BackendError::conflict(message),
        _ => BackendError::Store(err),
    }
}

/// Get user by ID
pub async fn find_user_by_id(pool: &SqlitePool, id: i64) -> Result<User, BackendError> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, login, first_name, last_name, birth_day, gender, interests, city
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| BackendError::not_found(format!("user {}", id)))
}

/// Get user by login
pub async fn find_user_by_login(pool: &SqlitePool, login: &str) -> Result<User, BackendError> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, login, first_name, last_name, birth_day, gender, interests, city
        FROM users
        WHERE login = ?
        "#,
    )
    .bind(login)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| BackendError::not_found(format!("user '{}'", login)))
}

/// Check whether a login is already taken
pub async fn login_exists(pool: &SqlitePool, login: &str) -> Result<bool, BackendError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE login = ?")
        .bind(login)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Search users whose first or last name starts with `query`
///
/// Ordered by id, capped at [`MAX_RESULTS`]. Every result is marked new.
pub async fn search_users(pool: &SqlitePool, query: &str) -> Result<Vec<UserSummary>, BackendError> {
    let pattern = like_prefix(query);

    let mut users = sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT id, first_name, last_name, city
        FROM users
        WHERE first_name_lower LIKE ? ESCAPE '\' OR last_name_lower LIKE ? ESCAPE '\'
        ORDER BY id
        LIMIT ?
        "#,
    )
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

/// Register a new user
///
/// Hashes the password, inserts the row and returns the stored profile with
/// its generated id.
///
/// # Errors
/// * `SharedError` - a required field is blank
/// * `Conflict` - the login is taken
pub async fn register_user(
    pool: &SqlitePool,
    credentials: &CredentialStore,
    request: &SignupRequest,
) -> Result<User, BackendError> {
    request.validate()?;
    let password_hash = credentials.hash(&request.password).await?;

    let mut tx = begin_write(pool).await?;

    let result = sqlx::query(
        r#"
        INSERT INTO users (
            login, password, first_name, last_name, first_name_lower, last_name_lower,
            birth_day, gender, interests, city
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&request.login)
    .bind(&password_hash)
    .bind(&request.first_name)
    .bind(&request.last_name)
    .bind(fold_name(&request.first_name))
    .bind(fold_name(&request.last_name))
    .bind(request.birth_day)
    .bind(&request.gender)
    .bind(&request.interests)
    .bind(&request.city)
    .execute(&mut *tx)
    .await
    .map_err(|e| conflict_on_unique(e, "login already taken"))?;

    tx.commit().await?;

    Ok(User {
        id: result.last_insert_rowid(),
        login: request.login.clone(),
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        birth_day: request.birth_day,
        gender: request.gender.clone(),
        interests: request.interests.clone(),
        city: request.city.clone(),
    })
}

/// Replace every mutable profile field of `user.id`
///
/// The login is fixed at registration; a record carrying a different login
/// is rejected.
pub async fn update_user(pool: &SqlitePool, user: &User) -> Result<User, BackendError> {
    user.validate()?;

    let mut tx = begin_write(pool).await?;

    let stored_login: Option<String> = sqlx::query_scalar("SELECT login FROM users WHERE id = ?")
        .bind(user.id)
        .fetch_optional(&mut *tx)
        .await?;

    match stored_login {
        None => return Err(BackendError::not_found(format!("user {}", user.id))),
        Some(login) if login != user.login => {
            return Err(SharedError::validation("login", "login cannot be changed").into());
        }
        Some(_) => {}
    }

    sqlx::query(
        r#"
        UPDATE users
        SET first_name = ?, last_name = ?, first_name_lower = ?, last_name_lower = ?,
            birth_day = ?, gender = ?, interests = ?, city = ?
        WHERE id = ?
        "#,
    )
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(fold_name(&user.first_name))
    .bind(fold_name(&user.last_name))
    .bind(user.birth_day)
    .bind(&user.gender)
    .bind(&user.interests)
    .bind(&user.city)
    .bind(user.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(user.clone())
}

/// Delete a user together with every friend edge that references it
pub async fn delete_user(pool: &SqlitePool, id: i64) -> Result<(), BackendError> {
    let mut tx = begin_write(pool).await?;

    let edges = sqlx::query("DELETE FROM friends WHERE user_id = ? OR friend_id = ?")
        .bind(id)
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let deleted = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if deleted == 0 {
        return Err(BackendError::not_found(format!("user {}", id)));
    }

    tx.commit().await?;
    tracing::info!("Deleted user {} and {} relationship rows", id, edges);
    Ok(())
}

/// Check a login/password pair
///
/// An unknown login and a wrong password produce the same
/// `Unauthenticated` error, after the same amount of bcrypt work.
pub async fn verify_credentials(
    pool: &SqlitePool,
    store: &CredentialStore,
    credentials: &Credentials,
) -> Result<User, BackendError> {
    let record = sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT id, login, password, first_name, last_name, birth_day, gender, interests, city
        FROM users
        WHERE login = ?
        "#,
    )
    .bind(&credentials.login)
    .fetch_optional(pool)
    .await?;

    let Some(record) = record else {
        store.verify_dummy(&credentials.password).await;
        return Err(BackendError::Unauthenticated);
    };

    if store.verify(&credentials.password, &record.password).await? {
        Ok(record.user)
    } else {
        Err(BackendError::Unauthenticated)
    }
}
