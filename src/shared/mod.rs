//! Shared Types Module
//!
//! Types that are independent of the HTTP layer: request/response bodies,
//! the user and relationship model, configuration, and their errors.
//!
//! # Module Structure
//!
//! - **`social`** - Users, summaries, relationships, auth request bodies
//! - **`config`** - Layered server configuration
//! - **`error`** - Validation and serialization errors

/// Social graph types
pub mod social;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{ConfigError, ServerConfig, ServerConfigBuilder};
pub use error::SharedError;
pub use social::{Credentials, LoginExists, Relationship, SignupRequest, User, UserSummary};
