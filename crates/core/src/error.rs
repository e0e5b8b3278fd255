//! Validation error model.

use thiserror::Error;

/// Result type used for input validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Malformed user input, caught before any network call.
///
/// These are resolved entirely on the client and are rendered as a message
/// next to the form that produced them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Display name is empty (after trimming).
    #[error("name cannot be empty")]
    EmptyName,

    /// Email address is not syntactically valid.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// Role value is not one of the known roles.
    #[error("unknown role: '{0}'")]
    UnknownRole(String),

    /// `password` and `confirm_password` differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Password is shorter than the minimum length.
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl ValidationError {
    pub fn invalid_email(raw: impl Into<String>) -> Self {
        Self::InvalidEmail(raw.into())
    }

    pub fn unknown_role(raw: impl Into<String>) -> Self {
        Self::UnknownRole(raw.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_form_copy() {
        assert_eq!(ValidationError::PasswordMismatch.to_string(), "Passwords do not match");
        assert_eq!(
            ValidationError::PasswordTooShort { min: 6 }.to_string(),
            "Password must be at least 6 characters"
        );
    }
}
