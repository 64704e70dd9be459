//! Authentication response types
//!
//! Request bodies live in `shared::social` next to the profile types.

use axum::{
    http::{header::AUTHORIZATION, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::backend::auth::sessions::{bearer_header, TokenError, TokenService};
use crate::shared::social::User;

/// Authentication response
///
/// Returned by signup and signin. The token is also sent as the
/// `Authorization: Bearer <token>` response header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for the `/api/v1` routes
    pub token: String,
    pub user: User,
}

impl AuthResponse {
    /// Issue a fresh token for `user`
    pub fn issue(tokens: &TokenService, user: User) -> Result<Self, TokenError> {
        let token = tokens.issue(&user.login)?;
        Ok(Self { token, user })
    }

    /// Response with `status`, the bearer header and this body
    pub fn with_status(self, status: StatusCode) -> Response {
        let header = bearer_header(&self.token);
        (status, [(AUTHORIZATION, header)], Json(self)).into_response()
    }
}
