//! Account Dashboard - profile and password maintenance for signed-in users
//!
//! The crate holds both sides of the dashboard: the HTTP API that applies
//! account changes and the client library whose controller drives the
//! dashboard forms against it.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, migrations)
//! - **api**: HTTP handlers, middleware, and routes
//! - **client**: Session store and dashboard view controller
//! - **types**: Shared response envelopes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Seed a user and print a token for it
//! cargo run -- user create --email jane@example.com --name Jane --password abc123
//! ```

pub mod api;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User, UserResponse};
pub use errors::{AppError, AppResult};
