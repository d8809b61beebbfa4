//! Error types for homehelp-core.

use crate::types::{Role, SessionContext};
use thiserror::Error;

/// Result type for homehelp-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in homehelp-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A form or step failed client-side validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested action is not valid in the current state.
    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        /// State the flow was in.
        from: &'static str,
        /// Action that was attempted.
        action: &'static str,
    },

    /// An actor of the wrong role was offered to a session context.
    #[error("A {role} account cannot sign in to the {context} area")]
    RoleMismatch {
        /// Context that rejected the actor.
        context: SessionContext,
        /// Role carried by the actor.
        role: Role,
    },

    /// Token storage failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Client-side validation failures, surfaced inline next to the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty (after trimming).
    #[error("{0} is required")]
    EmptyField(&'static str),

    /// The email address is not plausible.
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// A chat message was blank.
    #[error("Message cannot be empty")]
    EmptyMessage,
}

/// Trim `value` and fail with [`ValidationError::EmptyField`] when nothing is left.
pub fn require(field: &'static str, value: &str) -> std::result::Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_trims() {
        assert_eq!(require("Name", "  Asha  ").unwrap(), "Asha");
    }

    #[test]
    fn test_require_rejects_whitespace() {
        assert_eq!(
            require("Address", " \n\t"),
            Err(ValidationError::EmptyField("Address"))
        );
    }

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            ValidationError::EmptyField("Description").to_string(),
            "Description is required"
        );
        let err: Error = ValidationError::PasswordMismatch.into();
        assert_eq!(err.to_string(), "Passwords do not match");
    }
}
