//! Dashboard view state.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::config::{DEFAULT_MIN_PASSWORD_LENGTH, DEFAULT_PROFILE_REVERT_DELAY_MS};
use crate::domain::UserResponse;

/// Whether the profile card or the edit forms are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Display,
    Edit,
}

/// Lifecycle of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success(String),
    Error(String),
}

impl FormStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FormStatus::Loading)
    }

    /// Success and error messages are dropped; Idle and Loading are kept.
    pub(crate) fn clear_message(&mut self) {
        if matches!(self, FormStatus::Success(_) | FormStatus::Error(_)) {
            *self = FormStatus::Idle;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameForm {
    pub name: String,
    pub status: FormStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub status: FormStatus,
}

/// Everything the dashboard renders, besides the session user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub mode: Mode,
    pub name_form: NameForm,
    pub password_form: PasswordForm,
}

/// Tunables for the dashboard controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Shortest new password accepted before any request is made
    pub min_password_length: usize,
    /// Delay between a successful rename and the return to Display
    pub profile_revert_delay: Duration,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            profile_revert_delay: Duration::from_millis(DEFAULT_PROFILE_REVERT_DELAY_MS),
        }
    }
}

/// Profile card contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub name: String,
    pub email: String,
    /// e.g. `January 5, 2024`
    pub joined: String,
    /// e.g. `Jan 5, 2024, 3:04 PM`, or `Never`
    pub last_login: String,
}

impl ProfileSummary {
    pub fn from_user(user: &UserResponse) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            joined: format_joined(user.created_at),
            last_login: user
                .last_login
                .map(format_last_login)
                .unwrap_or_else(|| "Never".to_string()),
        }
    }
}

fn format_joined(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

fn format_last_login(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %-I:%M %p").to_string()
}
