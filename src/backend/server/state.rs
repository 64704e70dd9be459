/**
 * Application State
 *
 * This module defines the state shared by every handler and the
 * `FromRef` implementations that let handlers extract only the part they
 * need.
 *
 * All members are cheap to clone: the pool and both services are
 * reference-counted internally.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     // query through `pool`
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::password::CredentialStore;
use crate::backend::auth::sessions::TokenService;

/// Central state container for the Axum application
///
/// # Fields
///
/// * `db_pool` - SQLite connection pool
/// * `tokens` - Issues and authenticates bearer tokens
/// * `credentials` - Hashes and verifies passwords
#[derive(Clone, Debug)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub tokens: TokenService,
    pub credentials: CredentialStore,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, tokens: TokenService, credentials: CredentialStore) -> Self {
        Self {
            db_pool,
            tokens,
            credentials,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.db_pool.clone()
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

impl FromRef<AppState> for CredentialStore {
    fn from_ref(state: &AppState) -> Self {
        state.credentials.clone()
    }
}

#[cfg(test)]
pub(crate) async fn test_state() -> AppState {
    use std::time::Duration;

    AppState::new(
        crate::backend::server::config::test_pool().await,
        TokenService::new(b"test-secret", Duration::from_secs(3600)),
        CredentialStore::new(crate::backend::auth::password::TEST_COST).expect("credential store"),
    )
}
