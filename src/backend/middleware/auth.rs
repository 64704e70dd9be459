/**
 * Authentication Middleware
 *
 * This module guards the protected API. It extracts the bearer token from
 * the `Authorization` header, authenticates it with the `TokenService`,
 * resolves the login to a stored user and attaches that principal to the
 * request extensions for the handlers behind it.
 *
 * Every rejection is a `BackendError`, so a guarded request gets exactly one
 * response: either the handler's or the error's.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::bearer_token;
use crate::backend::auth::users::find_user_by_login;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Principal resolved from a verified token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub login: String,
}

impl AuthenticatedUser {
    /// Reject the request unless `user_id` is the caller's own id
    pub fn ensure_owns(&self, user_id: i64) -> Result<(), BackendError> {
        if self.id == user_id {
            Ok(())
        } else {
            tracing::warn!("User {} attempted to act on user {}", self.id, user_id);
            Err(BackendError::forbidden("forbidden request"))
        }
    }
}

/// Authentication middleware
///
/// Responds 401 when the header is absent, is not a bearer credential, or
/// names a user that no longer exists. Token failures map through
/// `TokenError`: 400 for a missing or unparsable token, 401 for a bad
/// signature, a non-HMAC algorithm or an expired token.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::Unauthenticated
        })?;

    let token = bearer_token(auth_header).ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::Unauthenticated
    })?;

    let claims = app_state.tokens.authenticate(token).map_err(|e| {
        tracing::warn!("Rejected token: {}", e);
        BackendError::from(e)
    })?;

    let user = match find_user_by_login(&app_state.db_pool, &claims.login).await {
        Ok(user) => user,
        Err(BackendError::NotFound { .. }) => {
            tracing::warn!("Token for unknown login '{}'", claims.login);
            return Err(BackendError::Unauthenticated);
        }
        Err(e) => return Err(e),
    };

    request.extensions_mut().insert(AuthenticatedUser {
        id: user.id,
        login: user.login,
    });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::Unauthenticated
            })?;

        Ok(AuthUser(user))
    }
}
