//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, PasswordService, ProfileService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Token verification
    pub auth_service: Arc<dyn AuthService>,
    /// Display name updates
    pub profile_service: Arc<dyn ProfileService>,
    /// Password changes
    pub password_service: Arc<dyn PasswordService>,
    /// Database handle for health checks; absent when services are injected
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state from a database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);
        Self::from_services(&container).with_database(database)
    }

    /// Build state from any service container.
    pub fn from_services(container: &dyn ServiceContainer) -> Self {
        Self::new(container.auth(), container.profiles(), container.passwords())
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        profile_service: Arc<dyn ProfileService>,
        password_service: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            auth_service,
            profile_service,
            password_service,
            database: None,
        }
    }

    /// Attach the database used by the health endpoint.
    pub fn with_database(mut self, database: Arc<Database>) -> Self {
        self.database = Some(database);
        self
    }
}
