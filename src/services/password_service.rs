//! Password service - Changes the authenticated user's password.
//!
//! The old password is verified before anything is written, so a rejected
//! attempt leaves the stored hash untouched. The read-verify-write sequence
//! takes no lock: two concurrent changes for the same user both pass
//! verification against the same old hash and the last save wins.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{HashingParams, MSG_INVALID_OLD_PASSWORD, MSG_PASSWORDS_REQUIRED};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// Password service trait for dependency injection.
#[async_trait]
pub trait PasswordService: Send + Sync {
    /// Replace the user's password after checking the current one.
    async fn update_password(
        &self,
        id: Uuid,
        old_password: String,
        new_password: String,
    ) -> AppResult<User>;
}

/// Concrete implementation of PasswordService using the user repository.
pub struct PasswordManager {
    repo: Arc<dyn UserRepository>,
    hashing: HashingParams,
}

impl PasswordManager {
    pub fn new(repo: Arc<dyn UserRepository>, hashing: HashingParams) -> Self {
        Self { repo, hashing }
    }
}

#[async_trait]
impl PasswordService for PasswordManager {
    async fn update_password(
        &self,
        id: Uuid,
        old_password: String,
        new_password: String,
    ) -> AppResult<User> {
        if old_password.is_empty() || new_password.is_empty() {
            return Err(AppError::validation(MSG_PASSWORDS_REQUIRED));
        }

        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found()?;

        let stored = Password::from_hash(user.password_hash.clone());
        if !stored.verify(&old_password)? {
            tracing::debug!(user_id = %id, "Rejected password change: old password mismatch");
            return Err(AppError::validation(MSG_INVALID_OLD_PASSWORD));
        }

        let hashed = Password::new(&new_password, &self.hashing)?;
        user.update_password_hash(hashed.into_string());

        let user = self.repo.save(&user).await?;
        tracing::info!(user_id = %user.id, "Password updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockUserRepository;

    fn fast_params() -> HashingParams {
        HashingParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }

    fn stored_user(id: Uuid, plain: &str) -> User {
        let hash = Password::new(plain, &fast_params()).unwrap().into_string();
        User::new(id, "jane@example.com".to_string(), hash, "Jane".to_string())
    }

    #[tokio::test]
    async fn test_missing_fields_rejected_before_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(0);
        repo.expect_save().times(0);

        let service = PasswordManager::new(Arc::new(repo), fast_params());
        for (old, new) in [("", "newpass1"), ("oldpass1", ""), ("", "")] {
            let result = service
                .update_password(Uuid::new_v4(), old.to_string(), new.to_string())
                .await;
            match result {
                Err(AppError::Validation(msg)) => assert_eq!(msg, MSG_PASSWORDS_REQUIRED),
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_wrong_old_password_never_saves() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "correct-horse"))));
        repo.expect_save().times(0);

        let service = PasswordManager::new(Arc::new(repo), fast_params());
        let result = service
            .update_password(
                Uuid::new_v4(),
                "battery-staple".to_string(),
                "new-secret".to_string(),
            )
            .await;

        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, MSG_INVALID_OLD_PASSWORD),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_success_saves_new_hash() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "correct-horse"))));
        repo.expect_save()
            .withf(|user| {
                let hash = Password::from_hash(user.password_hash.clone());
                hash.verify("new-secret").unwrap_or(false)
                    && !hash.verify("correct-horse").unwrap_or(true)
            })
            .times(1)
            .returning(|user| Ok(user.clone()));

        let service = PasswordManager::new(Arc::new(repo), fast_params());
        let result = service
            .update_password(
                Uuid::new_v4(),
                "correct-horse".to_string(),
                "new-secret".to_string(),
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|id| {
            Ok(Some(User::new(
                id,
                "jane@example.com".to_string(),
                "plaintext?!".to_string(),
                "Jane".to_string(),
            )))
        });
        repo.expect_save().times(0);

        let service = PasswordManager::new(Arc::new(repo), fast_params());
        let result = service
            .update_password(Uuid::new_v4(), "a".to_string(), "b".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
