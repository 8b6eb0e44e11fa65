//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations (PostgreSQL via SeaORM)
//! - User record repository

pub mod db;
pub mod repositories;

pub use db::{Database, MigrationStep, Migrator};
pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
