//! Friendships
//!
//! - **`db`** - Relationship repository over the `friends` table
//! - **`handlers`** - `/api/v1/friends` endpoints

pub mod db;
pub mod handlers;

pub use handlers::{add_friend, list_friends, list_unknown, remove_friend};
