//! Identity model: who a portal user is.
//!
//! An [`Identity`] is created once by the identity backend and never mutated
//! in place; a profile or role change produces a new record that replaces the
//! current one wholesale.

use serde::{Deserialize, Serialize};

use safecity_core::{Entity, IdentityId, ValidationError, ValidationResult, ValueObject};

use crate::Role;

// ─────────────────────────────────────────────────────────────────────────────
// Email
// ─────────────────────────────────────────────────────────────────────────────

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;

/// A syntactically valid, normalized (trimmed + lowercased) email address.
///
/// Used as the unique login key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let normalized = raw.trim().to_lowercase();
        if is_well_formed(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(ValidationError::invalid_email(raw.trim()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_well_formed(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return false;
    }
    if email.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > MAX_LOCAL_PART_LEN || domain.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

impl ValueObject for Email {}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::parse(&value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl core::fmt::Display for Email {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Display name
// ─────────────────────────────────────────────────────────────────────────────

/// Non-empty (after trimming) display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for DisplayName {}

impl TryFrom<String> for DisplayName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DisplayName::parse(&value)
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl core::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Profile / Identity
// ─────────────────────────────────────────────────────────────────────────────

/// The validated, password-free part of a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: DisplayName,
    pub email: Email,
    pub role: Role,
}

impl Profile {
    /// Build a profile from raw field values.
    pub fn new(name: &str, email: &str, role: Role) -> ValidationResult<Self> {
        Ok(Self {
            name: DisplayName::parse(name)?,
            email: Email::parse(email)?,
            role,
        })
    }
}

impl ValueObject for Profile {}

/// An authenticated user record.
///
/// # Invariants
/// - `id` is assigned by the identity backend and never changes.
/// - `role` is one of the closed [`Role`] set.
/// - `email` uniquely identifies the record in the backing store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub name: DisplayName,
    pub email: Email,
    pub role: Role,
}

impl Identity {
    /// Materialize a freshly registered profile under a backend-assigned id.
    pub fn from_profile(id: IdentityId, profile: Profile) -> Self {
        Self {
            id,
            name: profile.name,
            email: profile.email,
            role: profile.role,
        }
    }

    /// The profile this identity was registered with.
    pub fn profile(&self) -> Profile {
        Profile {
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

impl Entity for Identity {
    type Id = IdentityId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
