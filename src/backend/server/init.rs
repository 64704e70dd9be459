/**
 * Server Initialization
 *
 * This module turns a validated `ServerConfig` into a ready-to-serve Axum
 * router.
 *
 * # Initialization Process
 *
 * 1. Open the database pool and run migrations
 * 2. Build the credential store at the configured bcrypt cost
 * 3. Build the token service from the injected secret and TTL
 * 4. Create the router with all routes and layers
 *
 * Unlike optional integrations, none of these steps may fail silently: a
 * server without its database or signing secret cannot answer any request.
 */

use axum::Router;
use thiserror::Error;

use crate::backend::auth::password::CredentialStore;
use crate::backend::auth::sessions::TokenService;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, run_migrations};
use crate::backend::server::state::AppState;
use crate::shared::config::{ServerConfig, ServerSettings};

/// Reasons the server cannot start
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database setup failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("credential store setup failed: {0}")]
    Credentials(#[from] bcrypt::BcryptError),
}

/// Create and configure the Axum application
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing friendgraph backend server");

    let db_pool = load_database(&config.database).await?;
    run_migrations(&db_pool).await?;

    let credentials = CredentialStore::new(config.auth.bcrypt_cost)?;
    let tokens = TokenService::from_settings(&config.auth);
    tracing::info!(
        "Auth configured (bcrypt cost {}, token ttl {}s)",
        credentials.cost(),
        config.auth.token_ttl_secs
    );

    let app = build_app(AppState::new(db_pool, tokens, credentials), &config.server);
    tracing::info!("Router configured");
    Ok(app)
}

/// Build the router around an existing state
pub fn build_app(state: AppState, settings: &ServerSettings) -> Router<()> {
    create_router(state, settings)
}
