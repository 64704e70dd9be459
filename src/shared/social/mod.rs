//! Social graph types
//!
//! Users and the relationships between them, as exchanged with clients.

pub mod relationship;
pub mod user;

pub use relationship::Relationship;
pub use user::{Credentials, LoginExists, SignupRequest, User, UserSummary};
