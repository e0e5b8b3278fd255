//! `safecity-session`
//!
//! **Responsibility:** the session store and its boundaries.
//!
//! This crate provides:
//! - [`SessionStore`]: who is logged in, with login/register/logout
//! - [`IdentityBackend`]: the registration/credential-check seam
//! - [`CredentialStore`]: persistence of the session across reloads
//! - [`SessionConfig`]: timeouts, token lifetime and storage location
//!
//! Pages receive the store explicitly (usually as `Arc<SessionStore>`) and
//! only ever read it or call its operations.

pub mod backend;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod store;

pub use backend::{Authenticated, IdentityBackend, InMemoryIdentityBackend};
pub use config::SessionConfig;
pub use credentials::{CredentialStore, FileCredentialStore, InMemoryCredentialStore, StoredSession};
pub use error::{BackendError, PersistenceError, SessionError};
#[cfg(feature = "http")]
pub use http::HttpIdentityBackend;
pub use store::{SessionSnapshot, SessionStatus, SessionStore};
