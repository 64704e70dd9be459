//! Authentication Module
//!
//! Password storage, session tokens, the user repository and the HTTP
//! handlers that create and authenticate users.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - bcrypt credential store
//! ├── sessions.rs     - JWT token service
//! ├── users.rs        - User repository
//! └── handlers/       - signup, signin, current-user handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: profile and password → user stored with a bcrypt hash → token returned
//! 2. **Signin**: login and password → hash verified → token returned
//! 3. **Protected routes**: bearer token → signature, algorithm and expiry checked → user resolved by login

/// bcrypt password hashing
pub mod password;

/// JWT token issuing and authentication
pub mod sessions;

/// User data access
pub mod users;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{check_login, get_current_user, signin, signup, AuthResponse};
pub use password::CredentialStore;
pub use sessions::{Claims, TokenError, TokenService};
