//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::user_handler;
use crate::domain::UserResponse;
use crate::types::{ErrorResponse, UserEnvelope};

/// OpenAPI documentation for the account API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Dashboard API",
        version = "0.1.0",
        description = "Authenticated profile and password maintenance"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        user_handler::update_profile,
        user_handler::update_password,
    ),
    components(
        schemas(
            UserResponse,
            UserEnvelope,
            ErrorResponse,
            user_handler::UpdateProfileRequest,
            user_handler::UpdatePasswordRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Account", description = "Profile and password updates for the signed-in user")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT also accepted as the `token` cookie"))
                        .build(),
                ),
            );
        }
    }
}
