//! Registration page controller.
//!
//! Owns the field values and the error banner. Submission validates locally,
//! then calls the session store; on failure every field keeps what the user
//! typed. The spinner reads [`SessionStore::status`], which stays
//! `Authenticating` for as long as the submission is in flight.

use serde::Serialize;

use safecity_auth::{RegistrationForm, Role};
use safecity_session::{SessionError, SessionStore};

use crate::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
    Role,
}

/// One choice on the role picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub selected: bool,
}

#[derive(Debug, Default)]
pub struct RegistrationPage {
    pub form: RegistrationForm,
    pub error: Option<String>,
}

impl RegistrationPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.form.name = value,
            Field::Email => self.form.email = value,
            Field::Password => self.form.password = value,
            Field::ConfirmPassword => self.form.confirm_password = value,
            Field::Role => self.form.role = value,
        }
    }

    pub fn role_options(&self) -> Vec<RoleOption> {
        Role::ALL
            .iter()
            .map(|role| RoleOption {
                value: role.as_str(),
                label: role.label(),
                description: role.description(),
                selected: self.form.role == role.as_str(),
            })
            .collect()
    }

    /// Submit the form. Returns the route to navigate to on success.
    pub async fn submit(&mut self, session: &SessionStore) -> Option<Route> {
        self.error = None;

        match session.register_form(&self.form).await {
            Ok(identity) => {
                tracing::info!(identity_id = %identity.id, "registration complete");
                Some(Route::Dashboard)
            }
            Err(err) => {
                self.error = Some(error_message(&err));
                None
            }
        }
    }
}

/// Banner text for a failed submission.
pub fn error_message(err: &SessionError) -> String {
    match err {
        SessionError::Busy => "Please wait for the current request to finish.".to_string(),
        other => other.to_string(),
    }
}
