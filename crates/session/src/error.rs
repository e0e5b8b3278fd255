//! Session error taxonomy.

use thiserror::Error;

use safecity_core::ValidationError;

/// Failure reported by the identity backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// An identity already exists for this email.
    #[error("an account already exists for this email")]
    Conflict,

    /// Login rejected. Deliberately says nothing about whether the email exists.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The backend refused the payload (malformed on its side).
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Network failure, timeout, or server-side error.
    #[error("identity service unavailable: {0}")]
    Unavailable(String),
}

/// Error returned by the session store's mutating operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("an account already exists for this email")]
    Conflict,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("identity service unavailable: {0}")]
    Unavailable(String),

    /// Another login/register is already in flight.
    #[error("another sign-in is already in progress")]
    Busy,

    /// A logout happened while this call was in flight; its result was discarded.
    #[error("sign-in was cancelled by logout")]
    Superseded,
}

impl From<BackendError> for SessionError {
    fn from(value: BackendError) -> Self {
        match value {
            BackendError::Conflict => SessionError::Conflict,
            BackendError::InvalidCredentials => SessionError::InvalidCredentials,
            BackendError::Rejected(msg) => SessionError::Rejected(msg),
            BackendError::Unavailable(msg) => SessionError::Unavailable(msg),
        }
    }
}

/// Failure of the credential persistence layer.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("credential storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored credential is corrupt: {0}")]
    Corrupt(String),
}
