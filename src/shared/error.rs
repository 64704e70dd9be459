//! Shared Error Types
//!
//! This module defines error types raised by the request and model types in
//! `shared`. They carry no HTTP knowledge; the backend maps them onto status
//! codes in `backend::error`.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - A request field failed validation
//!
//! # Usage
//!
//! ```rust
//! use friendgraph::shared::error::SharedError;
//!
//! let error = SharedError::validation("login", "Login must not be blank");
//! ```

use thiserror::Error;

/// Errors produced while building or validating shared types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization failed
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// A field failed validation
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// Name of the offending field (as it appears on the wire)
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error for `field`
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
