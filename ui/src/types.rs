//! Wire types shared with the backend

use homehelp_core::{Actor, AuthGrant, ValidationError};
use serde::{Deserialize, Serialize};

/// Login request body
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by login and register endpoints.
///
/// Older backends put the actor under `helper` or `user`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, alias = "helper", alias = "user")]
    pub actor: Option<Actor>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponse {
    pub fn into_grant(self) -> Result<AuthGrant, AuthFailure> {
        match (self.token, self.actor) {
            (Some(token), Some(actor)) if !token.is_empty() => Ok(AuthGrant { token, actor }),
            _ => Err(AuthFailure::InvalidResponse),
        }
    }
}

/// Which call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

/// Why a login or registration did not produce a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// Rejected before sending.
    Validation(ValidationError),
    /// 401 or 403.
    Rejected,
    /// Could not reach the backend or got a non-success status.
    Network(String),
    /// Success status without a usable body, or an actor of the wrong role.
    InvalidResponse,
}

impl AuthFailure {
    /// Text shown next to the form.
    pub fn message(&self, action: AuthAction) -> String {
        match (self, action) {
            (AuthFailure::Validation(e), _) => e.to_string(),
            (AuthFailure::Rejected, AuthAction::Login) => "Invalid email or password".to_string(),
            (_, AuthAction::Login) => "Login failed. Please try again.".to_string(),
            (_, AuthAction::Register) => "Registration failed. Please try again.".to_string(),
        }
    }
}

impl From<ValidationError> for AuthFailure {
    fn from(err: ValidationError) -> Self {
        AuthFailure::Validation(err)
    }
}
