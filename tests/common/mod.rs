//! Common test utilities and helpers
//!
//! - In-memory application fixture
//! - Authentication helpers
//! - Response assertions

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use assertions::*;
pub use auth_helpers::*;
pub use database::*;
