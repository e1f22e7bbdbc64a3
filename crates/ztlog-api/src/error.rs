//! API error types.

use thiserror::Error;
use ztlog_storage::StorageError;

/// Message shown when the backend rejects the credential.
pub const AUTH_EXPIRED_MESSAGE: &str = "인증이 만료되었습니다. 다시 로그인해주세요.";

/// Error type for every call that reaches (or tries to reach) the backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The backend answered 401. Fatal to the session, never retried.
    #[error("인증이 만료되었습니다. 다시 로그인해주세요.")]
    AuthExpired,

    /// Any other non-2xx answer, transport failure or malformed envelope.
    #[error("{message}")]
    RequestFailed {
        status: Option<u16>,
        message: String,
    },

    /// Credential storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn request_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Fallback message for a non-2xx answer without a readable `message`.
    pub fn status_fallback(status: u16) -> Self {
        ApiError::request_failed(Some(status), format!("API 오류 ({})", status))
    }

    /// HTTP status, when the error came from a backend answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AuthExpired => Some(401),
            ApiError::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }

    /// Returns true if the screen can keep its last good state and show
    /// the message. Only an expired session forces a logout.
    pub fn is_recoverable(&self) -> bool {
        !self.is_auth_expired()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::RequestFailed {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
