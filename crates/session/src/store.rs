//! The session store: single authority for who is logged in.
//!
//! State machine:
//!
//! ```text
//! Anonymous ──login/register/restore──▶ Authenticating ──ok──▶ Authenticated
//!     ▲                                      │                      │
//!     └────────────── failure ───────────────┘                      │
//!     └──────────────────────────────── logout ─────────────────────┘
//! ```
//!
//! At most one login, register or restore is in flight. A logout at any point
//! wins: every mutation bumps an epoch, and an in-flight call whose epoch went
//! stale is discarded instead of committed.

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;

use safecity_auth::{Email, Identity, Password, Registration, RegistrationForm};

use crate::backend::{Authenticated, IdentityBackend};
use crate::config::SessionConfig;
use crate::credentials::{CredentialStore, StoredSession};
use crate::error::{BackendError, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Anonymous,
    Authenticating,
    Authenticated,
}

/// A consistent read of identity and status taken under one lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current: Option<Identity>,
    pub status: SessionStatus,
}

#[derive(Debug)]
struct SessionState {
    /// Last committed identity. Left untouched while authenticating.
    current: Option<Identity>,
    status: SessionStatus,
    epoch: u64,
}

impl SessionState {
    /// Status implied by the committed identity.
    fn settled_status(&self) -> SessionStatus {
        if self.current.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        }
    }
}

pub struct SessionStore {
    backend: Arc<dyn IdentityBackend>,
    credentials: Arc<dyn CredentialStore>,
    config: SessionConfig,
    state: RwLock<SessionState>,
    /// Serializes credential I/O so a logout's `clear` always lands after a
    /// concurrent commit's `save`. Never held by readers.
    persist: Mutex<()>,
}

impl core::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionStore")
            .field("config", &self.config)
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

/// Reservation for one in-flight login/register.
///
/// Dropping it unsettled (the caller abandoned the future) puts the status
/// back to what the committed identity implies.
struct Attempt<'a> {
    store: &'a SessionStore,
    epoch: u64,
    settled: bool,
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.store.state.write();
        if state.epoch == self.epoch && state.status == SessionStatus::Authenticating {
            state.status = state.settled_status();
            tracing::debug!(epoch = self.epoch, "session attempt abandoned");
        }
    }
}

impl SessionStore {
    pub fn new(
        backend: Arc<dyn IdentityBackend>,
        credentials: Arc<dyn CredentialStore>,
        config: SessionConfig,
    ) -> Self {
        Self {
            backend,
            credentials,
            config,
            state: RwLock::new(SessionState {
                current: None,
                status: SessionStatus::Anonymous,
                epoch: 0,
            }),
            persist: Mutex::new(()),
        }
    }

    /// The current identity, if any. Never waits on in-flight calls.
    pub fn current(&self) -> Option<Identity> {
        self.state.read().current.clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.read().status
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read();
        SessionSnapshot {
            current: state.current.clone(),
            status: state.status,
        }
    }

    /// Re-derive the session from the persisted credential at startup.
    ///
    /// The stored identity is only trusted once the backend resolves the
    /// stored token to that same identity. An unreadable, expired, unknown or
    /// mismatched credential leaves the session anonymous and is released.
    /// An unreachable backend also leaves it anonymous but keeps the
    /// credential for the next start. Does nothing if a session is already
    /// active or being established.
    pub async fn restore(&self) -> Option<Identity> {
        let epoch = {
            let state = self.state.read();
            if state.status != SessionStatus::Anonymous {
                return state.current.clone();
            }
            state.epoch
        };

        let stored = {
            let _persist = self.persist.lock();
            let stored = match self.credentials.load() {
                Ok(Some(stored)) => stored,
                Ok(None) => {
                    tracing::debug!("no stored session");
                    return None;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "stored session unreadable; starting anonymous");
                    self.release_credential();
                    return None;
                }
            };
            if let Err(err) = stored.token.validate(Utc::now()) {
                tracing::info!(reason = %err, identity_id = %stored.identity.id, "stored session rejected; starting anonymous");
                self.release_credential();
                return None;
            }
            stored
        };

        let attempt = {
            let mut state = self.state.write();
            if state.epoch != epoch || state.status != SessionStatus::Anonymous {
                // A sign-in started while the credential was loading; it owns the session.
                return state.current.clone();
            }
            self.claim(&mut state, "restore")
        };

        let outcome = self.bounded(self.backend.resolve(&stored.token)).await;
        self.settle_restore(attempt, stored, outcome)
    }

    /// Authenticate an existing identity and make it current.
    ///
    /// The in-flight slot is claimed when this is called, not when the future
    /// is first polled, so an overlapping call fails with
    /// [`SessionError::Busy`] straight away.
    pub fn login(
        &self,
        email: Email,
        password: Password,
    ) -> impl Future<Output = Result<Identity, SessionError>> + Send + '_ {
        let attempt = self.begin("login");
        async move {
            let attempt = attempt?;
            let outcome = self.bounded(self.backend.login(&email, &password)).await;
            self.finish(attempt, "login", outcome)
        }
    }

    /// Create a new identity and make it current.
    pub fn register(
        &self,
        registration: Registration,
    ) -> impl Future<Output = Result<Identity, SessionError>> + Send + '_ {
        let attempt = self.begin("register");
        async move {
            let attempt = attempt?;
            let outcome = self.bounded(self.backend.register(&registration)).await;
            self.finish(attempt, "register", outcome)
        }
    }

    /// Validate a registration form, then register.
    ///
    /// On validation failure nothing reaches the backend and the session is
    /// untouched.
    pub async fn register_form(&self, form: &RegistrationForm) -> Result<Identity, SessionError> {
        let registration = form.validate().inspect_err(|err| {
            tracing::debug!(error = %err, "registration form rejected");
        })?;
        self.register(registration).await
    }

    /// End the session. Idempotent, and wins over any in-flight call.
    pub fn logout(&self) {
        let previous = {
            let mut state = self.state.write();
            state.epoch += 1;
            state.status = SessionStatus::Anonymous;
            state.current.take()
        };

        let _persist = self.persist.lock();
        self.release_credential();

        match previous {
            Some(identity) => tracing::info!(identity_id = %identity.id, "session.logout"),
            None => tracing::debug!("session.logout with no active session"),
        }
    }

    fn begin(&self, op: &'static str) -> Result<Attempt<'_>, SessionError> {
        let mut state = self.state.write();
        if state.status == SessionStatus::Authenticating {
            tracing::warn!(op, "rejected: another sign-in is in flight");
            return Err(SessionError::Busy);
        }
        Ok(self.claim(&mut state, op))
    }

    fn claim(&self, state: &mut SessionState, op: &'static str) -> Attempt<'_> {
        state.epoch += 1;
        state.status = SessionStatus::Authenticating;
        tracing::info!(op, epoch = state.epoch, "session.{op}.started");
        Attempt {
            store: self,
            epoch: state.epoch,
            settled: false,
        }
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, BackendError>
    where
        F: Future<Output = Result<T, BackendError>>,
    {
        let limit = self.config.backend_timeout;
        tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
            Err(BackendError::Unavailable(format!(
                "no response within {}ms",
                limit.as_millis()
            )))
        })
    }

    fn finish(
        &self,
        mut attempt: Attempt<'_>,
        op: &'static str,
        outcome: Result<Authenticated, BackendError>,
    ) -> Result<Identity, SessionError> {
        attempt.settled = true;
        let epoch = attempt.epoch;

        let authenticated = {
            let mut state = self.state.write();
            if state.epoch != epoch {
                match &outcome {
                    Ok(auth) => tracing::info!(op, epoch, identity_id = %auth.identity.id, "discarding sign-in superseded by logout"),
                    Err(err) => tracing::info!(op, epoch, error = %err, "discarding failed sign-in superseded by logout"),
                }
                return Err(SessionError::Superseded);
            }

            match outcome {
                Ok(auth) => {
                    state.current = Some(auth.identity.clone());
                    state.status = SessionStatus::Authenticated;
                    auth
                }
                Err(err) => {
                    state.status = state.settled_status();
                    tracing::warn!(op, epoch, error = %err, "session.{op}.failed");
                    return Err(err.into());
                }
            }
        };

        self.persist_committed(epoch, &authenticated);
        tracing::info!(
            op,
            epoch,
            identity_id = %authenticated.identity.id,
            role = %authenticated.identity.role,
            "session.{op}.succeeded"
        );
        Ok(authenticated.identity)
    }

    fn settle_restore(
        &self,
        mut attempt: Attempt<'_>,
        stored: StoredSession,
        outcome: Result<Identity, BackendError>,
    ) -> Option<Identity> {
        attempt.settled = true;
        let epoch = attempt.epoch;

        let _persist = self.persist.lock();
        let mut state = self.state.write();
        if state.epoch != epoch {
            tracing::info!(epoch, "discarding restore superseded by logout");
            return state.current.clone();
        }

        match outcome {
            Ok(identity) if identity == stored.identity => {
                state.current = Some(identity.clone());
                state.status = SessionStatus::Authenticated;
                tracing::info!(epoch, identity_id = %identity.id, role = %identity.role, "session restored");
                Some(identity)
            }
            Ok(identity) => {
                state.status = state.settled_status();
                tracing::warn!(
                    epoch,
                    stored_id = %stored.identity.id,
                    stored_role = %stored.identity.role,
                    resolved_id = %identity.id,
                    resolved_role = %identity.role,
                    "stored identity does not match its token; starting anonymous"
                );
                self.release_credential();
                None
            }
            Err(BackendError::Unavailable(reason)) => {
                state.status = state.settled_status();
                tracing::warn!(epoch, %reason, "could not verify stored session; starting anonymous");
                None
            }
            Err(err) => {
                state.status = state.settled_status();
                tracing::info!(epoch, error = %err, "stored session refused by backend; starting anonymous");
                self.release_credential();
                None
            }
        }
    }

    fn persist_committed(&self, epoch: u64, authenticated: &Authenticated) {
        let _persist = self.persist.lock();
        // A logout between commit and here already released the slot.
        if self.state.read().epoch != epoch {
            return;
        }
        let stored = StoredSession {
            identity: authenticated.identity.clone(),
            token: authenticated.token.clone(),
        };
        if let Err(err) = self.credentials.save(&stored) {
            tracing::warn!(error = %err, "failed to persist session; it will not survive a reload");
        }
    }

    fn release_credential(&self) {
        if let Err(err) = self.credentials.clear() {
            tracing::warn!(error = %err, "failed to clear stored session");
        }
    }
}
