//! Session configuration.
//!
//! Values come from environment variables, falling back to defaults:
//!
//! | variable                     | default                  |
//! |------------------------------|--------------------------|
//! | `SAFECITY_API_URL`           | `http://localhost:8080`  |
//! | `SAFECITY_BACKEND_TIMEOUT_MS`| `10000`                  |
//! | `SAFECITY_SESSION_TTL_SECS`  | `86400`                  |
//! | `SAFECITY_CREDENTIAL_PATH`   | OS data dir              |

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

pub const ENV_API_URL: &str = "SAFECITY_API_URL";
pub const ENV_BACKEND_TIMEOUT_MS: &str = "SAFECITY_BACKEND_TIMEOUT_MS";
pub const ENV_SESSION_TTL_SECS: &str = "SAFECITY_SESSION_TTL_SECS";
pub const ENV_CREDENTIAL_PATH: &str = "SAFECITY_CREDENTIAL_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Base URL of the identity API.
    pub api_url: String,

    /// Upper bound on any single identity-backend call.
    pub backend_timeout: Duration,

    /// Lifetime of tokens minted by the in-process backend.
    pub session_ttl: chrono::Duration,

    /// Where the session credential is persisted; `None` selects the OS default.
    pub credential_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            backend_timeout: Duration::from_secs(10),
            session_ttl: chrono::Duration::hours(24),
            credential_path: None,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.api_url = url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup(ENV_BACKEND_TIMEOUT_MS) {
            let ms: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_BACKEND_TIMEOUT_MS} must be an integer, got {raw:?}"))?;
            anyhow::ensure!(ms > 0, "{ENV_BACKEND_TIMEOUT_MS} must be positive");
            config.backend_timeout = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup(ENV_SESSION_TTL_SECS) {
            let secs: i64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_SESSION_TTL_SECS} must be an integer, got {raw:?}"))?;
            anyhow::ensure!(secs > 0, "{ENV_SESSION_TTL_SECS} must be positive");
            config.session_ttl = chrono::Duration::seconds(secs);
        }

        if let Some(path) = lookup(ENV_CREDENTIAL_PATH) {
            config.credential_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}
