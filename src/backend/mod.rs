//! Backend Module
//!
//! The Axum HTTP server for friendgraph.
//!
//! # Architecture
//!
//! - **`server`** - Startup, application state, database pool
//! - **`routes`** - Route table and middleware layers
//! - **`auth`** - Passwords, tokens, user repository, signup/signin handlers
//! - **`users`** - Profile handlers
//! - **`friends`** - Relationship repository and handlers
//! - **`middleware`** - Bearer token guard
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication and user storage
//! ├── users/          - Profile endpoints
//! ├── friends/        - Friendship storage and endpoints
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Error Handling
//!
//! Repositories, middleware and handlers all return `BackendError`, which
//! renders as `{"error": ..., "status": ...}` with the matching status code.
//! Internal failures are logged and reported as a generic 500.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user storage
pub mod auth;

/// User profile endpoints
pub mod users;

/// Friendships
pub mod friends;

/// Request middleware
pub mod middleware;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use server::{create_app, AppState};
