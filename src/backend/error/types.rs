/**
 * Backend Error Types
 *
 * This module defines the error type shared by repositories, middleware and
 * HTTP handlers. Every variant maps onto exactly one HTTP status code.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - Malformed or invalid request bodies (400)
 * - Missing or rejected credentials (401)
 * - Acting on another user's resources (403)
 * - Unknown users or relationships (404)
 * - Duplicate logins or friend edges (409)
 *
 * ## Internal Errors
 *
 * Store, hashing and signing failures (500). Their details are logged but
 * never sent to the client.
 */

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::password::PasswordError;
use crate::backend::auth::sessions::TokenError;
use crate::shared::SharedError;

/// Message returned to clients for every internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use friendgraph::backend::error::BackendError;
///
/// let err = BackendError::not_found("user 42");
/// let err = BackendError::conflict("login already taken");
/// let err = BackendError::forbidden("forbidden request");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status (e.g. malformed JSON body)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// No valid principal for this request
    #[error("Unauthorized")]
    Unauthenticated,

    /// The principal may not act on this resource
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// The addressed resource does not exist
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// The write would violate a uniqueness invariant
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Validation error (from shared request types)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Token could not be issued or authenticated
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Underlying store failure
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    Password(#[from] PasswordError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `Unauthenticated` - 401 Unauthorized
    /// - `Forbidden` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `Conflict` - 409 Conflict
    /// - `SharedError` - 400 for validation, 500 for serialization
    /// - `Token` - 400 for missing/malformed tokens, 401 when rejected, 500 when signing fails
    /// - `Store`, `Password` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Token(err) => match err {
                TokenError::Missing | TokenError::Malformed(_) => StatusCode::BAD_REQUEST,
                TokenError::InvalidSignature
                | TokenError::UnsupportedAlgorithm
                | TokenError::Expired => StatusCode::UNAUTHORIZED,
                TokenError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Store(_) | Self::Password(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error hides an internal failure from the client
    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        if self.is_internal() {
            return INTERNAL_ERROR_MESSAGE.to_string();
        }
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Forbidden { message } => message.clone(),
            Self::Conflict { message } => message.clone(),
            Self::NotFound { resource } => format!("{} not found", resource),
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<PathRejection> for BackendError {
    fn from(rejection: PathRejection) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<QueryRejection> for BackendError {
    fn from(rejection: QueryRejection) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid request");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::forbidden("no").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(BackendError::not_found("user 1").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BackendError::conflict("dup").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            BackendError::Store(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_token_status_mapping() {
        assert_eq!(BackendError::from(TokenError::Missing).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            BackendError::from(TokenError::Malformed("bad".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BackendError::from(TokenError::InvalidSignature).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BackendError::from(TokenError::UnsupportedAlgorithm).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(BackendError::from(TokenError::Expired).status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_from_shared_error() {
        let backend_error: BackendError = SharedError::validation("login", "blank").into();
        assert_eq!(backend_error.status_code(), StatusCode::BAD_REQUEST);
        assert!(backend_error.message().contains("login"));
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let error = BackendError::Store(sqlx::Error::Protocol("secret table layout".to_string()));
        assert!(error.is_internal());
        assert_eq!(error.message(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(BackendError::not_found("user 7").message(), "user 7 not found");
    }
}
