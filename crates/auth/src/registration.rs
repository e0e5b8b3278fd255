//! Registration form validation.
//!
//! Runs before any call to the identity backend. Validation borrows the form,
//! so the caller keeps every field value when it fails.

use serde::{Deserialize, Serialize};

use safecity_core::{ValidationError, ValidationResult};

use crate::password::MIN_PASSWORD_LEN;
use crate::{Password, Profile, Role};

/// Raw field values as the registration page holds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Raw role value from the role picker.
    pub role: String,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            role: Role::default().as_str().to_string(),
        }
    }
}

/// A validated registration, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub profile: Profile,
    pub password: Password,
}

impl RegistrationForm {
    /// Check the form and build a [`Registration`].
    ///
    /// Checks run in a fixed order: password confirmation, password length,
    /// role, name, email. The first failure is returned.
    pub fn validate(&self) -> ValidationResult<Registration> {
        if self.password.as_bytes() != self.confirm_password.as_bytes() {
            return Err(ValidationError::PasswordMismatch);
        }

        let password = Password::new(self.password.clone());
        if !password.meets_minimum_length() {
            return Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LEN });
        }

        // The role picker restricts input, but this is the boundary the
        // Identity invariant relies on.
        let role: Role = self.role.parse()?;
        let profile = Profile::new(&self.name, &self.email, role)?;

        Ok(Registration { profile, password })
    }
}
