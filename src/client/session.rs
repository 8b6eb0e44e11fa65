//! Client session store.
//!
//! Holds the signed-in user and performs the account mutations on behalf of
//! the dashboard. The store is injected into the controller as a trait
//! object; nothing here is process-global.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use super::error::{ClientError, ClientResult};
use crate::domain::UserResponse;
use crate::types::UserEnvelope;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Session state and account actions consumed by the dashboard.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Currently signed-in user
    fn user(&self) -> Option<UserResponse>;

    fn set_user(&self, user: Option<UserResponse>);

    /// True while any store request is in flight
    fn is_loading(&self) -> bool;

    /// Message from the last failed request
    fn error(&self) -> Option<String>;

    fn set_error(&self, error: Option<String>);

    /// Rename the signed-in user; the stored user is replaced on success.
    async fn update_profile(&self, name: &str) -> ClientResult<UserResponse>;

    /// Change the signed-in user's password.
    async fn update_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> ClientResult<UserResponse>;

    /// Forget the user and token.
    async fn logout(&self) -> ClientResult<()>;
}

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    user: Option<UserResponse>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Serialize)]
struct ProfileBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordBody<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

/// HTTP implementation of SessionStore backed by `reqwest`.
pub struct ApiSession {
    http: Client,
    base_url: String,
    state: RwLock<SessionState>,
    in_flight: AtomicUsize,
}

impl ApiSession {
    /// Create a session for an already authenticated user.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        user: Option<UserResponse>,
    ) -> ClientResult<Self> {
        let http = Client::builder().build()?;
        Ok(Self::with_client(http, base_url, token, user))
    }

    /// Create a session reusing an existing HTTP client.
    pub fn with_client(
        http: Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
        user: Option<UserResponse>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            state: RwLock::new(SessionState {
                token: Some(token.into()),
                user,
                error: None,
            }),
            in_flight: AtomicUsize::new(0),
        }
    }

    fn token(&self) -> ClientResult<String> {
        self.read_state(|state| state.token.clone())
            .ok_or(ClientError::NotAuthenticated)
    }

    fn read_state<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write_state(&self, f: impl FnOnce(&mut SessionState)) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }

    async fn put_user<B>(&self, path: &str, body: &B) -> ClientResult<UserResponse>
    where
        B: Serialize + Sync,
    {
        let token = self.token()?;
        let _loading = LoadingGuard::enter(&self.in_flight);

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "PUT");
        let result = match self.http.put(&url).bearer_auth(token).json(body).send().await {
            Ok(response) => read_envelope(response).await,
            Err(e) => Err(ClientError::from(e)),
        };

        match &result {
            Ok(user) => self.write_state(|state| {
                state.user = Some(user.clone());
                state.error = None;
            }),
            Err(e) => {
                let message = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| e.to_string());
                tracing::debug!(%url, "Session request failed: {}", message);
                self.write_state(|state| state.error = Some(message));
            }
        }
        result
    }
}

async fn read_envelope(response: Response) -> ClientResult<UserResponse> {
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let envelope: UserEnvelope = response.json().await?;
    Ok(envelope.user)
}

/// Counts a request as in flight until dropped.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionStore for ApiSession {
    fn user(&self) -> Option<UserResponse> {
        self.read_state(|state| state.user.clone())
    }

    fn set_user(&self, user: Option<UserResponse>) {
        self.write_state(|state| state.user = user);
    }

    fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    fn error(&self) -> Option<String> {
        self.read_state(|state| state.error.clone())
    }

    fn set_error(&self, error: Option<String>) {
        self.write_state(|state| state.error = error);
    }

    async fn update_profile(&self, name: &str) -> ClientResult<UserResponse> {
        self.put_user("/update-profile", &ProfileBody { name }).await
    }

    async fn update_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> ClientResult<UserResponse> {
        let body = PasswordBody {
            old_password,
            new_password,
        };
        self.put_user("/update-password", &body).await
    }

    async fn logout(&self) -> ClientResult<()> {
        self.write_state(|state| *state = SessionState::default());
        tracing::info!("Session cleared");
        Ok(())
    }
}
