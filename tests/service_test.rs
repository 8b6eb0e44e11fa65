//! Profile and password service tests against the in-memory store.

mod common;

use std::sync::Arc;

use account_dashboard::errors::AppError;
use account_dashboard::services::{PasswordManager, PasswordService, ProfileManager, ProfileService};

use common::{fast_hashing, password_matches, seed_user, InMemoryUsers};

// =============================================================================
// ProfileService
// =============================================================================

#[tokio::test]
async fn test_rename_touches_only_the_matching_record() {
    let repo = InMemoryUsers::new();
    let jane = seed_user(&repo, "Jane", "abc123");
    let bob = seed_user(&repo, "Bob", "abc123");
    let service = ProfileManager::new(repo.clone());

    for name in ["Janet", " J ", "Jane Q. Public", "名前"] {
        let updated = service.update_profile(jane.id, name.to_string()).await.unwrap();
        assert_eq!(updated.name, name.trim());
        assert_eq!(repo.get(jane.id).unwrap().name, name.trim());
        assert_eq!(repo.get(bob.id).unwrap().name, "Bob");
    }
    assert_eq!(repo.save_count(), 4);
}

#[tokio::test]
async fn test_rename_bumps_updated_at_only() {
    let repo = InMemoryUsers::new();
    let jane = seed_user(&repo, "Jane", "abc123");
    let service = ProfileManager::new(repo.clone());

    let updated = service.update_profile(jane.id, "Janet".to_string()).await.unwrap();

    assert!(updated.updated_at >= jane.updated_at);
    assert_eq!(updated.created_at, jane.created_at);
    assert_eq!(updated.email, jane.email);
    assert_eq!(updated.password_hash, jane.password_hash);
}

#[tokio::test]
async fn test_blank_names_never_write() {
    let repo = InMemoryUsers::new();
    let jane = seed_user(&repo, "Jane", "abc123");
    let service = ProfileManager::new(repo.clone());

    for name in ["", " ", "\t", "\n  \r"] {
        let result = service.update_profile(jane.id, name.to_string()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
    assert_eq!(repo.save_count(), 0);
    assert_eq!(repo.get(jane.id).unwrap().name, "Jane");
}

// =============================================================================
// PasswordService
// =============================================================================

#[tokio::test]
async fn test_password_change_swaps_credentials() {
    let repo = InMemoryUsers::new();
    let jane = seed_user(&repo, "Jane", "abc123");
    let service = PasswordManager::new(repo.clone(), fast_hashing());

    service
        .update_password(jane.id, "abc123".to_string(), "n3w-secret".to_string())
        .await
        .unwrap();

    assert!(password_matches(&repo, jane.id, "n3w-secret"));
    assert!(!password_matches(&repo, jane.id, "abc123"));
}

#[tokio::test]
async fn test_wrong_old_password_leaves_hash_unchanged() {
    let repo = InMemoryUsers::new();
    let jane = seed_user(&repo, "Jane", "abc123");
    let service = PasswordManager::new(repo.clone(), fast_hashing());

    for old in ["abc12", "ABC123", "abc123 ", "x"] {
        let result = service
            .update_password(jane.id, old.to_string(), "n3w-secret".to_string())
            .await;
        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid old password"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    assert_eq!(repo.get(jane.id).unwrap().password_hash, jane.password_hash);
    assert_eq!(repo.save_count(), 0);
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let repo = InMemoryUsers::new();
    let service = PasswordManager::new(repo.clone(), fast_hashing());

    let result = service
        .update_password(uuid::Uuid::new_v4(), "a".to_string(), "b".to_string())
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_concurrent_changes_last_writer_wins() {
    let repo = InMemoryUsers::new();
    let jane = seed_user(&repo, "Jane", "abc123");
    let service = Arc::new(PasswordManager::new(repo.clone(), fast_hashing()));

    let (a, b) = tokio::join!(
        service.update_password(jane.id, "abc123".to_string(), "first-pass".to_string()),
        service.update_password(jane.id, "abc123".to_string(), "second-pass".to_string()),
    );

    // Both verify against the original hash; exactly one new password survives.
    assert!(a.is_ok() && b.is_ok());
    let first = password_matches(&repo, jane.id, "first-pass");
    let second = password_matches(&repo, jane.id, "second-pass");
    assert!(first ^ second);
}
