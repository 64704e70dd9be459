//! Middleware Module
//!
//! HTTP middleware applied in front of handlers.
//!
//! - **`auth`** - Bearer token guard for the `/api/v1` routes

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
