//! Response envelopes shared by every endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::UserResponse;

/// Successful mutation envelope carrying the updated user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    /// Always `true`
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Profile updated successfully")]
    pub message: String,
    pub user: UserResponse,
}

impl UserEnvelope {
    pub fn new(message: impl Into<String>, user: impl Into<UserResponse>) -> Self {
        Self {
            success: true,
            message: message.into(),
            user: user.into(),
        }
    }
}

/// Failure envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Name is required")]
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
