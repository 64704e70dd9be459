//! User Data Structures
//!
//! Public user profile, the compact summary used by listings, and the
//! request bodies that create or authenticate a user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// A user's public profile
///
/// Carries no password field; the stored hash only lives on the backend's
/// internal row type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-generated identifier
    pub id: i64,
    /// Unique login, fixed at registration
    pub login: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_day: NaiveDate,
    pub gender: Option<String>,
    pub interests: Option<String>,
    pub city: Option<String>,
}

impl User {
    /// Check the profile fields a full replace would write
    pub fn validate(&self) -> Result<(), SharedError> {
        require_non_blank("firstName", &self.first_name)?;
        require_non_blank("lastName", &self.last_name)?;
        Ok(())
    }
}

/// Compact listing entry for searches and friend lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub city: Option<String>,
    /// True when the user is not yet connected to the viewer
    #[sqlx(skip)]
    pub is_new: bool,
}

/// Sign-up request body
#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub login: String,
    /// Plaintext password, hashed before storage
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_day: NaiveDate,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_non_blank("login", &self.login)?;
        if self.login.chars().any(char::is_whitespace) {
            return Err(SharedError::validation("login", "must not contain whitespace"));
        }
        require_non_blank("password", &self.password)?;
        require_non_blank("firstName", &self.first_name)?;
        require_non_blank("lastName", &self.last_name)?;
        Ok(())
    }
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("birth_day", &self.birth_day)
            .finish_non_exhaustive()
    }
}

/// Sign-in credentials. Never persisted.
#[derive(Clone, Deserialize, Serialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response for the login availability check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginExists {
    pub exists: bool,
}

fn require_non_blank(field: &str, value: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::validation(field, "must not be blank"));
    }
    Ok(())
}
