use homehelp_core::{Actor, AuthGrant};
use serde::{Deserialize, Serialize};

// ============= Authentication Types =============

/// Body of a login call.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by the login and register endpoints.
///
/// Backends disagree on where the actor lives: newer ones answer with
/// `actor`, older ones with `helper` or `user`. Everything is optional so a
/// half-filled body can be reported as an invalid response rather than a
/// parse error.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, alias = "helper", alias = "user")]
    pub actor: Option<Actor>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponse {
    /// Turn the body into a grant, failing when the token or actor is missing.
    pub fn into_grant(self) -> Result<AuthGrant> {
        match (self.token, self.actor) {
            (Some(token), Some(actor)) if !token.is_empty() => Ok(AuthGrant { token, actor }),
            _ => Err(AppError::InvalidResponse(
                self.message
                    .unwrap_or_else(|| "response is missing token or actor".to_string()),
            )),
        }
    }
}

// ============= Error Types =============

/// Which auth call failed, for picking the display message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] homehelp_core::ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text shown to the user after a failed login or registration.
    ///
    /// Validation failures name the field; everything else collapses to a
    /// generic message.
    pub fn user_message(&self, action: AuthAction) -> String {
        match (self, action) {
            (AppError::Validation(e), _) => e.to_string(),
            (AppError::Auth(_), AuthAction::Login) => "Invalid email or password".to_string(),
            (_, AuthAction::Login) => "Login failed. Please try again.".to_string(),
            (_, AuthAction::Register) => "Registration failed. Please try again.".to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::InvalidResponse(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<homehelp_core::Error> for AppError {
    fn from(err: homehelp_core::Error) -> Self {
        match err {
            homehelp_core::Error::Validation(e) => AppError::Validation(e),
            homehelp_core::Error::RoleMismatch { .. } => AppError::InvalidResponse(err.to_string()),
            homehelp_core::Error::Storage(msg) => AppError::Storage(msg),
            homehelp_core::Error::InvalidTransition { .. } => AppError::Internal(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
