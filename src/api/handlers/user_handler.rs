//! Account update handlers.

use axum::{extract::State, response::Json, routing::put, Extension, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::extractors::JsonBody;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{MSG_PASSWORD_UPDATED, MSG_PROFILE_UPDATED};
use crate::errors::AppResult;
use crate::types::UserEnvelope;

/// Profile update request
///
/// Absent and `null` fields both reach the service as empty strings, which
/// it rejects with the usual presence message.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    /// New display name
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
}

/// Password change request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    /// Current password
    #[schema(example = "abc123")]
    pub old_password: Option<String>,
    /// Replacement password
    #[schema(example = "s3cure-pass")]
    pub new_password: Option<String>,
}

/// Create account routes (require authentication)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/update-profile", put(update_profile))
        .route("/update-password", put(update_password))
}

/// Update the caller's display name
#[utoipa::path(
    put,
    path = "/update-profile",
    tag = "Account",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserEnvelope),
        (status = 400, description = "Missing name or unknown user", body = crate::types::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::types::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::types::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    JsonBody(payload): JsonBody<UpdateProfileRequest>,
) -> AppResult<Json<UserEnvelope>> {
    let user = state
        .profile_service
        .update_profile(current_user.id, payload.name.unwrap_or_default())
        .await?;

    Ok(Json(UserEnvelope::new(MSG_PROFILE_UPDATED, user)))
}

/// Change the caller's password
#[utoipa::path(
    put,
    path = "/update-password",
    tag = "Account",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = UserEnvelope),
        (status = 400, description = "Missing fields, wrong old password or unknown user", body = crate::types::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::types::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::types::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_password(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    JsonBody(payload): JsonBody<UpdatePasswordRequest>,
) -> AppResult<Json<UserEnvelope>> {
    let user = state
        .password_service
        .update_password(
            current_user.id,
            payload.old_password.unwrap_or_default(),
            payload.new_password.unwrap_or_default(),
        )
        .await?;

    Ok(Json(UserEnvelope::new(MSG_PASSWORD_UPDATED, user)))
}
