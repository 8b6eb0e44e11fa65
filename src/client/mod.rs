//! Client side of the account dashboard.
//!
//! - `SessionStore`: the signed-in user plus account actions, with an HTTP
//!   implementation (`ApiSession`)
//! - `DashboardController`: the view state machine driving both forms

pub mod dashboard;
pub mod error;
pub mod session;

pub use dashboard::{
    DashboardController, DashboardSettings, FormStatus, Mode, NameForm, PasswordForm,
    ProfileSummary, ViewState,
};
pub use error::{ClientError, ClientResult};
pub use session::{ApiSession, SessionStore};

#[cfg(any(test, feature = "test-utils"))]
pub use session::MockSessionStore;
