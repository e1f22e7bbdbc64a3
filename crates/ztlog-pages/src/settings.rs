//! Account settings: password change, withdrawal and logout.

use crate::messages;
use crate::outcome::Outcome;
use crate::validation::{validate_password_change, validate_withdraw_phrase};
use tracing::{info, warn};
use ztlog_api::{AdminServices, ApiError};

/// Password change form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

pub struct SettingsController {
    services: AdminServices,
    password_form: PasswordForm,
    password_error: Option<String>,
    password_success: Option<String>,
    withdraw_error: Option<String>,
}

impl SettingsController {
    pub fn new(services: AdminServices) -> Self {
        Self {
            services,
            password_form: PasswordForm::default(),
            password_error: None,
            password_success: None,
            withdraw_error: None,
        }
    }

    pub fn password_form_mut(&mut self) -> &mut PasswordForm {
        &mut self.password_form
    }

    pub fn password_form(&self) -> &PasswordForm {
        &self.password_form
    }

    /// Validate the form, then call the API. The form is cleared on success.
    pub async fn change_password(&mut self) -> Outcome {
        self.password_error = None;
        self.password_success = None;

        let form = &self.password_form;
        if let Err(message) = validate_password_change(&form.current, &form.new, &form.confirm) {
            self.password_error = Some(message.clone());
            return Outcome::Invalid(message);
        }

        let result = self
            .services
            .auth
            .change_password(&form.current, &form.new)
            .await;
        match result {
            Ok(_) => {
                info!("Password changed");
                self.password_form = PasswordForm::default();
                self.password_success = Some(messages::PASSWORD_CHANGED.to_string());
                Outcome::Done
            }
            Err(e) => {
                warn!(error = %e, "Password change failed");
                self.password_error = Some(messages::PASSWORD_CHANGE_FAILED.to_string());
                Outcome::Failed(messages::PASSWORD_CHANGE_FAILED.to_string())
            }
        }
    }

    /// Withdraw the account once the operator typed the confirmation phrase,
    /// then log out. An expired session is treated as already withdrawn from
    /// this client's point of view and also ends in a logout.
    pub async fn withdraw(&mut self, typed_phrase: &str) -> Outcome {
        self.withdraw_error = None;
        if let Err(message) = validate_withdraw_phrase(typed_phrase) {
            self.withdraw_error = Some(message.clone());
            return Outcome::Invalid(message);
        }

        match self.services.auth.withdraw().await {
            Ok(_) => {
                info!("Account withdrawn");
                self.end_session();
                Outcome::Done
            }
            Err(ApiError::AuthExpired) => {
                self.end_session();
                Outcome::Failed(ApiError::AuthExpired.to_string())
            }
            Err(e) => {
                warn!(error = %e, "Withdrawal failed");
                self.withdraw_error = Some(messages::WITHDRAW_FAILED.to_string());
                Outcome::Failed(messages::WITHDRAW_FAILED.to_string())
            }
        }
    }

    /// Tell the backend, then drop the local credential regardless of the
    /// backend's answer.
    pub async fn logout(&mut self) -> Outcome {
        if let Err(e) = self.services.auth.logout().await {
            warn!(error = %e, "Server logout failed, clearing local session anyway");
        }
        self.end_session();
        Outcome::Done
    }

    /// Log out unless the expiry handler already did.
    fn end_session(&self) {
        let session = &self.services.session;
        if !session.is_authenticated() {
            return;
        }
        if let Err(e) = session.logout() {
            warn!(error = %e, "Failed to clear stored credential");
        }
    }

    pub fn password_error(&self) -> Option<&str> {
        self.password_error.as_deref()
    }

    pub fn password_success(&self) -> Option<&str> {
        self.password_success.as_deref()
    }

    pub fn withdraw_error(&self) -> Option<&str> {
        self.withdraw_error.as_deref()
    }
}
