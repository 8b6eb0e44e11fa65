//! Service Container - Centralized service access.
//!
//! Handlers and commands reach services through the container so that
//! tests can swap any of them for a mock.

use std::sync::Arc;

use super::{AuthService, PasswordService, ProfileService};
use crate::config::Config;
use crate::infra::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get profile service
    fn profiles(&self) -> Arc<dyn ProfileService>;

    /// Get password service
    fn passwords(&self) -> Arc<dyn PasswordService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    profile_service: Arc<dyn ProfileService>,
    password_service: Arc<dyn PasswordService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        profile_service: Arc<dyn ProfileService>,
        password_service: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            auth_service,
            profile_service,
            password_service,
        }
    }

    /// Wire every service against one user repository.
    pub fn from_repository(repo: Arc<dyn UserRepository>, config: Config) -> Self {
        use super::{Authenticator, PasswordManager, ProfileManager};

        let hashing = config.hashing;
        Self {
            auth_service: Arc::new(Authenticator::new(config)),
            profile_service: Arc::new(ProfileManager::new(repo.clone())),
            password_service: Arc::new(PasswordManager::new(repo, hashing)),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        Self::from_repository(Arc::new(UserStore::new(db)), config)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileService> {
        self.profile_service.clone()
    }

    fn passwords(&self) -> Arc<dyn PasswordService> {
        self.password_service.clone()
    }
}
