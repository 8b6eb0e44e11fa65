//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
pub mod container;
mod password_service;
mod profile_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use password_service::{PasswordManager, PasswordService};
pub use profile_service::{ProfileManager, ProfileService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
