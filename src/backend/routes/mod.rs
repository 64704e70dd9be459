//! Route Configuration Module
//!
//! - **`router`** - Router assembly and middleware layers
//! - **`api_routes`** - Public auth routes and the guarded `/api/v1` routes
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - Endpoint table
//! ```

/// Main router creation
pub mod router;

/// API route configuration
pub mod api_routes;

pub use router::create_router;
