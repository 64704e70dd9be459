//! Server Module
//!
//! Everything needed to turn a `ServerConfig` into a running Axum router.
//!
//! - **`config`** - Connection pool and migrations
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`init`** - Startup sequence and router assembly
//!
//! # Initialization Flow
//!
//! 1. Open the SQLite pool and apply migrations
//! 2. Build the credential store and token service from `AuthSettings`
//! 3. Create the router with the request timeout, CORS and tracing layers

pub mod config;
pub mod init;
pub mod state;

pub use init::{build_app, create_app, StartupError};
pub use state::AppState;
