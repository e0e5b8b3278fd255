//! Identity-backend boundary.
//!
//! The session store talks to whatever performs registration and credential
//! checks through [`IdentityBackend`]. Calls are potentially network-bound and
//! fallible; the store bounds them with a timeout.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use safecity_auth::{Email, Identity, Password, Registration, SessionToken, hash_password, verify_password};
use safecity_core::IdentityId;

use crate::error::BackendError;

/// Successful login/register: the identity plus the credential to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authenticated {
    pub identity: Identity,
    pub token: SessionToken,
}

#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Create a new identity. Duplicate emails fail with [`BackendError::Conflict`].
    async fn register(&self, registration: &Registration) -> Result<Authenticated, BackendError>;

    /// Authenticate an existing identity.
    ///
    /// Unknown email and wrong password both yield
    /// [`BackendError::InvalidCredentials`].
    async fn login(&self, email: &Email, password: &Password) -> Result<Authenticated, BackendError>;

    /// The identity a previously issued token stands for.
    ///
    /// Unknown, revoked and expired tokens yield
    /// [`BackendError::InvalidCredentials`].
    async fn resolve(&self, token: &SessionToken) -> Result<Identity, BackendError>;
}

#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct IssuedToken {
    token: SessionToken,
    email: Email,
}

/// In-process identity backend with Argon2-hashed passwords.
///
/// Serves local development and tests. Can be switched offline to exercise
/// the unavailable path.
#[derive(Debug)]
pub struct InMemoryIdentityBackend {
    accounts: Mutex<HashMap<Email, Account>>,
    tokens: Mutex<HashMap<String, IssuedToken>>,
    token_ttl: chrono::Duration,
    available: AtomicBool,
    requests: AtomicUsize,
}

impl InMemoryIdentityBackend {
    pub fn new(token_ttl: chrono::Duration) -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            tokens: Mutex::new(HashMap::new()),
            token_ttl,
            available: AtomicBool::new(true),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of register/login requests received (including failed ones).
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn account_count(&self) -> usize {
        self.accounts.lock().len()
    }

    fn admit(&self) -> Result<(), BackendError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(BackendError::Unavailable("identity service is offline".to_string()))
        }
    }

    fn issue(&self, identity: Identity) -> Authenticated {
        let token = SessionToken::issue(Utc::now(), self.token_ttl);
        self.tokens.lock().insert(
            token.value.clone(),
            IssuedToken {
                token: token.clone(),
                email: identity.email.clone(),
            },
        );
        Authenticated { identity, token }
    }
}

impl Default for InMemoryIdentityBackend {
    fn default() -> Self {
        Self::new(chrono::Duration::hours(24))
    }
}

#[async_trait]
impl IdentityBackend for InMemoryIdentityBackend {
    async fn register(&self, registration: &Registration) -> Result<Authenticated, BackendError> {
        self.admit()?;

        let email = registration.profile.email.clone();
        if self.accounts.lock().contains_key(&email) {
            return Err(BackendError::Conflict);
        }

        let password_hash = hash_password(&registration.password)
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;
        let identity = Identity::from_profile(IdentityId::new(), registration.profile.clone());

        // Re-check under the lock: the hash above ran unlocked.
        let mut accounts = self.accounts.lock();
        if accounts.contains_key(&email) {
            return Err(BackendError::Conflict);
        }
        accounts.insert(
            email,
            Account {
                identity: identity.clone(),
                password_hash,
            },
        );
        drop(accounts);

        tracing::debug!(identity_id = %identity.id, role = %identity.role, "identity registered");
        Ok(self.issue(identity))
    }

    async fn login(&self, email: &Email, password: &Password) -> Result<Authenticated, BackendError> {
        self.admit()?;

        let account = self.accounts.lock().get(email).cloned();
        match account {
            Some(account) if verify_password(&account.password_hash, password) => {
                Ok(self.issue(account.identity))
            }
            _ => Err(BackendError::InvalidCredentials),
        }
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Identity, BackendError> {
        self.admit()?;

        let email = match self.tokens.lock().get(&token.value) {
            Some(issued) if issued.token == *token && token.validate(Utc::now()).is_ok() => {
                issued.email.clone()
            }
            _ => return Err(BackendError::InvalidCredentials),
        };
        self.accounts
            .lock()
            .get(&email)
            .map(|account| account.identity.clone())
            .ok_or(BackendError::InvalidCredentials)
    }
}
