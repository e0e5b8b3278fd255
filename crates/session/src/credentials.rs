//! Credential persistence across reloads.
//!
//! The session store is the only user of this boundary. A credential is
//! saved on a successful login/register and cleared on logout or when it is
//! found invalid at startup.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use safecity_auth::{Identity, SessionToken};

use crate::error::PersistenceError;

/// What survives a reload: the identity and the token that vouches for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub identity: Identity,
    pub token: SessionToken,
}

pub trait CredentialStore: Send + Sync {
    fn save(&self, session: &StoredSession) -> Result<(), PersistenceError>;

    /// `Ok(None)` when nothing is stored.
    fn load(&self) -> Result<Option<StoredSession>, PersistenceError>;

    /// Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), PersistenceError>;
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    slot: Mutex<Option<StoredSession>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }

    pub fn peek(&self) -> Option<StoredSession> {
        self.slot.lock().clone()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn save(&self, session: &StoredSession) -> Result<(), PersistenceError> {
        *self.slot.lock() = Some(session.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredSession>, PersistenceError> {
        Ok(self.slot.lock().clone())
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        self.slot.lock().take();
        Ok(())
    }
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `path`, or at the OS default location when `None`.
    pub fn at(path: Option<PathBuf>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(default_credential_path()?)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, session: &StoredSession) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(session)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))?;

        // Write-then-rename so a crash never leaves a half-written credential.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<StoredSession>, PersistenceError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| PersistenceError::Corrupt(e.to_string()))
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// `<data dir>/safecity/session.json`.
pub fn default_credential_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut path = base;
    path.push("safecity");
    path.push("session.json");
    Ok(path)
}
