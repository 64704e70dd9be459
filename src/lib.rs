//! Friendgraph - Main Library
//!
//! Friendgraph is the backend of a small social network: users register and
//! sign in with a password, receive a signed bearer token, and use it to
//! browse profiles and manage symmetric friendships.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that cross the HTTP boundary
//!   - User profiles, summaries and request bodies
//!   - Relationship edges
//!   - Configuration and validation errors
//!
//! - **`backend`** - The Axum server
//!   - Credential store, token service and access guard
//!   - User and relationship repositories over SQLite
//!   - HTTP handlers, routing and error responses
//!
//! # Usage
//!
//! ```rust,no_run
//! use friendgraph::backend::server::create_app;
//! use friendgraph::shared::ServerConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types
pub mod shared;

/// Server-side code
pub mod backend;
