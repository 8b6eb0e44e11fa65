//! Dashboard view controller.
//!
//! A headless state machine behind the account dashboard: one Display/Edit
//! toggle over two forms that submit independently. Requests are never
//! cancelled. A Cancel bumps the epoch so that results arriving afterwards
//! only release their form's Loading state, and an unmounted controller
//! ignores results and timers entirely.

mod state;

pub use state::{
    DashboardSettings, FormStatus, Mode, NameForm, PasswordForm, ProfileSummary, ViewState,
};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use super::error::{ClientError, ClientResult};
use super::session::SessionStore;
use crate::config::{
    MSG_NAME_REQUIRED, MSG_OLD_PASSWORD_REQUIRED, MSG_PASSWORD_UPDATED,
    MSG_PASSWORD_UPDATE_FAILED, MSG_PROFILE_UPDATED, MSG_PROFILE_UPDATE_FAILED,
};

#[derive(Clone, Copy)]
enum Form {
    Name,
    Password,
}

#[derive(Default)]
struct Shared {
    view: ViewState,
    epoch: u64,
}

/// Drives the dashboard forms against a session store.
pub struct DashboardController {
    session: Arc<dyn SessionStore>,
    settings: DashboardSettings,
    shared: Arc<Mutex<Shared>>,
    mounted: Arc<AtomicBool>,
}

impl DashboardController {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self::with_settings(session, DashboardSettings::default())
    }

    pub fn with_settings(session: Arc<dyn SessionStore>, settings: DashboardSettings) -> Self {
        Self {
            session,
            settings,
            shared: Arc::new(Mutex::new(Shared::default())),
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Current view state.
    pub async fn snapshot(&self) -> ViewState {
        self.shared.lock().await.view.clone()
    }

    /// Profile card for the session user.
    pub fn profile_summary(&self) -> Option<ProfileSummary> {
        self.session.user().as_ref().map(ProfileSummary::from_user)
    }

    /// Enter Edit mode, seeding the name from the session user.
    pub async fn edit(&self) {
        let name = self.session.user().map(|u| u.name).unwrap_or_default();
        let mut shared = self.shared.lock().await;
        let view = &mut shared.view;
        view.mode = Mode::Edit;
        view.name_form.name = name;
        view.password_form.old_password.clear();
        view.password_form.new_password.clear();
    }

    /// Leave Edit mode and drop both forms' messages.
    pub async fn cancel(&self) {
        let mut shared = self.shared.lock().await;
        shared.epoch += 1;
        let view = &mut shared.view;
        view.mode = Mode::Display;
        view.name_form.status.clear_message();
        view.password_form.status.clear_message();
    }

    pub async fn set_name(&self, name: impl Into<String>) {
        self.shared.lock().await.view.name_form.name = name.into();
    }

    pub async fn set_old_password(&self, password: impl Into<String>) {
        self.shared.lock().await.view.password_form.old_password = password.into();
    }

    pub async fn set_new_password(&self, password: impl Into<String>) {
        self.shared.lock().await.view.password_form.new_password = password.into();
    }

    /// Submit the name form.
    ///
    /// Ignored outside Edit mode or while the previous submit is pending.
    /// On success the controller returns to Display after the configured
    /// delay unless a Cancel happens first.
    pub async fn submit_profile(&self) {
        let (name, epoch) = {
            let mut shared = self.shared.lock().await;
            let epoch = shared.epoch;
            let view = &mut shared.view;
            if view.mode != Mode::Edit || view.name_form.status.is_loading() {
                return;
            }
            if view.name_form.name.trim().is_empty() {
                view.name_form.status = FormStatus::Error(MSG_NAME_REQUIRED.to_string());
                return;
            }
            view.name_form.status = FormStatus::Loading;
            (view.name_form.name.clone(), epoch)
        };

        let result = self.session.update_profile(&name).await;

        let Some(mut shared) = self.settle(Form::Name, epoch).await else {
            return;
        };
        shared.view.name_form.status = match result {
            Ok(_) => {
                self.arm_revert(epoch);
                FormStatus::Success(MSG_PROFILE_UPDATED.to_string())
            }
            Err(e) => FormStatus::Error(failure_message(&e, MSG_PROFILE_UPDATE_FAILED)),
        };
    }

    /// Submit the password form.
    ///
    /// The new password length is checked before the old password's
    /// presence; neither failure reaches the network.
    pub async fn submit_password(&self) {
        let (old_password, new_password, epoch) = {
            let mut shared = self.shared.lock().await;
            let epoch = shared.epoch;
            let view = &mut shared.view;
            let form = &mut view.password_form;
            if view.mode != Mode::Edit || form.status.is_loading() {
                return;
            }
            if form.new_password.chars().count() < self.settings.min_password_length {
                form.status = FormStatus::Error(format!(
                    "Password must be at least {} characters",
                    self.settings.min_password_length
                ));
                return;
            }
            if form.old_password.is_empty() {
                form.status = FormStatus::Error(MSG_OLD_PASSWORD_REQUIRED.to_string());
                return;
            }
            form.status = FormStatus::Loading;
            (form.old_password.clone(), form.new_password.clone(), epoch)
        };

        let result = self
            .session
            .update_password(&old_password, &new_password)
            .await;

        let Some(mut shared) = self.settle(Form::Password, epoch).await else {
            return;
        };
        let form = &mut shared.view.password_form;
        match result {
            Ok(_) => {
                form.old_password.clear();
                form.new_password.clear();
                form.status = FormStatus::Success(MSG_PASSWORD_UPDATED.to_string());
            }
            Err(e) => {
                form.status = FormStatus::Error(failure_message(&e, MSG_PASSWORD_UPDATE_FAILED))
            }
        }
    }

    /// Whether the session store would accept a logout right now.
    pub fn can_logout(&self) -> bool {
        !self.session.is_loading()
    }

    /// Log out, unless the session store is busy with a request.
    pub async fn logout(&self) -> ClientResult<()> {
        if !self.can_logout() {
            return Err(ClientError::Busy);
        }
        self.session.logout().await
    }

    /// Stop applying results and timers to the view.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Lock the state for a request of `form` that started at `epoch`.
    ///
    /// Returns `None` when the result must be discarded. A result arriving
    /// after a Cancel still moves its form out of Loading.
    async fn settle(&self, form: Form, epoch: u64) -> Option<MutexGuard<'_, Shared>> {
        if !self.is_mounted() {
            return None;
        }
        let mut shared = self.shared.lock().await;
        if shared.epoch == epoch {
            return Some(shared);
        }

        let status = match form {
            Form::Name => &mut shared.view.name_form.status,
            Form::Password => &mut shared.view.password_form.status,
        };
        if status.is_loading() {
            *status = FormStatus::Idle;
        }
        None
    }

    fn arm_revert(&self, epoch: u64) {
        let shared = Arc::clone(&self.shared);
        let mounted = Arc::clone(&self.mounted);
        let delay = self.settings.profile_revert_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !mounted.load(Ordering::SeqCst) {
                return;
            }
            let mut shared = shared.lock().await;
            if shared.epoch == epoch && shared.view.mode == Mode::Edit {
                shared.view.mode = Mode::Display;
            }
        });
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn failure_message(error: &ClientError, fallback: &str) -> String {
    tracing::debug!("Dashboard request failed: {}", error);
    error
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}
