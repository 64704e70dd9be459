//! Authentication Handlers Module
//!
//! # Handlers
//!
//! - **`signup`** - POST /signup - register and receive a token
//! - **`check_login`** - GET /signup/{login} - login availability
//! - **`signin`** - POST /signin - exchange credentials for a token
//! - **`get_current_user`** - GET /api/v1/current-user - caller's profile
//!
//! Tokens go out both in the body and as an `Authorization: Bearer` header.

/// Response types
pub mod types;

/// Signup and login availability handlers
pub mod signup;

/// Signin handler
pub mod signin;

/// Current user handler
pub mod me;

pub use me::get_current_user;
pub use signin::signin;
pub use signup::{check_login, signup};
pub use types::AuthResponse;
