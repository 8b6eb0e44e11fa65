//! Profile service - Renames the authenticated user.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::MSG_NAME_REQUIRED;
use crate::domain::User;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// Profile service trait for dependency injection.
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Replace the user's display name.
    ///
    /// The name is trimmed; a blank name is rejected before the store is
    /// touched.
    async fn update_profile(&self, id: Uuid, name: String) -> AppResult<User>;
}

/// Concrete implementation of ProfileService using the user repository.
pub struct ProfileManager {
    repo: Arc<dyn UserRepository>,
}

impl ProfileManager {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ProfileService for ProfileManager {
    async fn update_profile(&self, id: Uuid, name: String) -> AppResult<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation(MSG_NAME_REQUIRED));
        }

        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found()?;
        user.update_name(name.to_string());

        let user = self.repo.save(&user).await?;
        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }
}
