//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, MSG_INVALID_TOKEN, MSG_NO_TOKEN, TOKEN_COOKIE_NAME};
use crate::errors::AppError;

/// Authenticated user extracted from JWT token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
}

/// JWT authentication middleware.
///
/// Accepts the token from the Authorization header or, failing that, the
/// `token` cookie, then injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers())
        .ok_or_else(|| AppError::unauthorized(MSG_NO_TOKEN))?;

    let claims = state.auth_service.verify_token(&token).map_err(|e| {
        tracing::debug!("Token rejected: {}", e);
        AppError::unauthorized(MSG_INVALID_TOKEN)
    })?;

    request
        .extensions_mut()
        .insert(CurrentUser { id: claims.sub });

    Ok(next.run(request).await)
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    let value = headers.get(COOKIE)?.to_str().ok()?;
    value
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, val)| key.trim() == TOKEN_COOKIE_NAME && !val.trim().is_empty())
        .map(|(_, val)| val.trim().to_string())
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.trim().strip_prefix(BEARER_TOKEN_PREFIX)?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
