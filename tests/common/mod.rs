//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use uuid::Uuid;

use account_dashboard::api::{create_router, AppState};
use account_dashboard::config::{Config, HashingParams, DEFAULT_CLIENT_URL};
use account_dashboard::domain::{Password, User};
use account_dashboard::errors::{AppError, AppResult};
use account_dashboard::infra::UserRepository;
use account_dashboard::services::{AuthService, Authenticator, Services};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

/// Argon2 parameters cheap enough for tests
pub fn fast_hashing() -> HashingParams {
    HashingParams {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

pub fn test_config() -> Config {
    let mut config = Config::new("postgres://localhost/unused", TEST_SECRET)
        .expect("test secret is long enough");
    config.hashing = fast_hashing();
    config
}

// =============================================================================
// In-memory user store
// =============================================================================

/// UserRepository backed by a HashMap, counting writes.
#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<HashMap<Uuid, User>>,
    saves: AtomicUsize,
}

impl InMemoryUsers {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().get(&id).cloned()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        // Read, then yield like a real round trip would.
        let user = self.get(id);
        tokio::task::yield_now().await;
        Ok(user)
    }

    async fn create(&self, email: String, password_hash: String, name: String) -> AppResult<User> {
        let user = User::new(Uuid::new_v4(), email, password_hash, name);
        self.insert(user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id) {
            return Err(AppError::not_found("User not found"));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }
}

/// Delegates reads to an in-memory store and fails every save.
pub struct FailingSaves {
    inner: Arc<InMemoryUsers>,
}

impl FailingSaves {
    pub fn wrap(inner: Arc<InMemoryUsers>) -> Arc<Self> {
        Arc::new(Self { inner })
    }
}

#[async_trait]
impl UserRepository for FailingSaves {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        self.inner.find_by_id(id).await
    }

    async fn create(&self, email: String, password_hash: String, name: String) -> AppResult<User> {
        self.inner.create(email, password_hash, name).await
    }

    async fn save(&self, _user: &User) -> AppResult<User> {
        Err(AppError::internal("connection reset"))
    }
}

/// Store a user with a real password hash.
pub fn seed_user(repo: &InMemoryUsers, name: &str, password: &str) -> User {
    let hash = Password::new(password, &fast_hashing())
        .expect("hashing succeeds")
        .into_string();
    let user = User::new(
        Uuid::new_v4(),
        format!("{}@example.com", name.to_lowercase()),
        hash,
        name.to_string(),
    );
    repo.insert(user.clone());
    user
}

/// Check a plain password against the stored hash.
pub fn password_matches(repo: &InMemoryUsers, id: Uuid, plain: &str) -> bool {
    let user = repo.get(id).expect("user exists");
    Password::from_hash(user.password_hash)
        .verify(plain)
        .expect("stored hash parses")
}

// =============================================================================
// Router
// =============================================================================

/// Router wired to the given store.
pub fn test_app(repo: Arc<dyn UserRepository>) -> Router {
    let services = Services::from_repository(repo, test_config());
    create_router(AppState::from_services(&services), DEFAULT_CLIENT_URL)
}

/// Bearer token for `user`, signed with the test secret.
pub fn token_for(user: &User) -> String {
    Authenticator::new(test_config())
        .issue_token(user)
        .expect("token issued")
        .access_token
}
