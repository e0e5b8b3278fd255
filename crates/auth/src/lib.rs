//! `safecity-auth` — identity model and authorization policy.
//!
//! This crate is intentionally decoupled from networking and storage: it
//! defines who a user is, what they may see, and how a registration form is
//! checked.

pub mod claims;
pub mod identity;
pub mod password;
pub mod registration;
pub mod roles;
pub mod view;

pub use claims::{SessionToken, TokenError};
pub use identity::{DisplayName, Email, Identity, Profile};
pub use password::{MIN_PASSWORD_LEN, Password, PasswordError, hash_password, verify_password};
pub use registration::{Registration, RegistrationForm};
pub use roles::Role;
pub use view::{AuthzError, ViewEntry, entries_or_empty, navigation_for, quick_actions, visible_entries, visible_entries_for};
