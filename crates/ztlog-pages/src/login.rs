//! Login screen.

use crate::messages;
use crate::outcome::Outcome;
use crate::validation::validate_login;
use tracing::{info, warn};
use ztlog_api::{AdminServices, ApiError, Route};

pub struct LoginController {
    services: AdminServices,
    error: Option<String>,
}

impl LoginController {
    pub fn new(services: AdminServices) -> Self {
        Self {
            services,
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Log in and go to the dashboard.
    ///
    /// Any rejection (non-2xx, a non-`SUCCESS` code, a missing token) shows
    /// the generic failure message and stays on this screen.
    pub async fn submit(&mut self, user_id: &str, password: &str) -> Outcome {
        if let Err(message) = validate_login(user_id, password) {
            return self.fail(Outcome::Invalid(message));
        }
        self.error = None;

        let token = match self.services.auth.login(user_id, password).await {
            Ok(response) if response.is_success() => response.data.map(|d| d.access_token),
            Ok(response) => {
                warn!(code = ?response.code, "Login rejected");
                None
            }
            Err(ApiError::AuthExpired) | Err(ApiError::RequestFailed { status: Some(_), .. }) => {
                None
            }
            Err(e) => {
                warn!(error = %e, "Login request failed");
                return self.fail(Outcome::Failed(messages::LOGIN_ERROR.to_string()));
            }
        };

        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return self.fail(Outcome::Failed(messages::LOGIN_FAILED.to_string()));
        };

        if let Err(e) = self.services.session.login(&token) {
            warn!(error = %e, "Failed to persist credential");
            return self.fail(Outcome::Failed(messages::LOGIN_ERROR.to_string()));
        }

        info!(user_id, "Login succeeded");
        self.services.navigator().navigate(Route::Dashboard);
        Outcome::Done
    }

    /// Create an account. Does not log in.
    pub async fn signup(&mut self, username: &str, password: &str) -> Outcome {
        if let Err(message) = validate_login(username, password) {
            return self.fail(Outcome::Invalid(message));
        }
        self.error = None;

        match self.services.auth.signup(username, password).await {
            Ok(response) if response.code.is_none() || response.is_success() => Outcome::Done,
            Ok(response) => {
                let message = response
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| messages::SIGNUP_FAILED.to_string());
                self.fail(Outcome::Failed(message))
            }
            Err(e) => self.fail(Outcome::Failed(e.to_string())),
        }
    }

    fn fail(&mut self, outcome: Outcome) -> Outcome {
        self.error = outcome.message().map(str::to_string);
        outcome
    }
}
