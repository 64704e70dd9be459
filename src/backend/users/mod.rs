//! User profile endpoints
//!
//! Data access lives in `auth::users`; this module only holds the HTTP
//! handlers.

pub mod handlers;

pub use handlers::{delete_user, get_user, search_users, update_user};
