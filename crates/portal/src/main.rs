//! SafeCity portal shell.
//!
//! Restores the persisted session and prints what the client would render
//! for it. `safecity-portal logout` ends the stored session instead.

use std::sync::Arc;

use anyhow::Context;
use serde_json::json;

use safecity_portal::{DashboardModel, NavbarModel, Route};
use safecity_session::{FileCredentialStore, IdentityBackend, SessionConfig, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    safecity_observability::init();

    let config = SessionConfig::from_env().context("invalid SafeCity configuration")?;
    let credentials = FileCredentialStore::at(config.credential_path.clone())
        .context("failed to resolve credential storage")?;
    tracing::info!(path = ?credentials.path(), api_url = %config.api_url, "starting portal");

    let backend = build_backend(&config)?;
    let session = Arc::new(SessionStore::new(backend, Arc::new(credentials), config));
    session.restore().await;

    if std::env::args().nth(1).as_deref() == Some("logout") {
        safecity_portal::navbar::logout(&session);
    }

    let location = std::env::var("SAFECITY_LOCATION").unwrap_or_else(|_| Route::Dashboard.path().to_string());
    let view = json!({
        "status": session.status(),
        "navbar": NavbarModel::build(&session, &location),
        "dashboard": DashboardModel::build(&session),
    });
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

#[cfg(feature = "http")]
fn build_backend(config: &SessionConfig) -> anyhow::Result<Arc<dyn IdentityBackend>> {
    let backend = safecity_session::HttpIdentityBackend::new(config)
        .context("failed to build HTTP identity backend")?;
    Ok(Arc::new(backend))
}

#[cfg(not(feature = "http"))]
fn build_backend(config: &SessionConfig) -> anyhow::Result<Arc<dyn IdentityBackend>> {
    tracing::warn!("built without the `http` feature; using the in-process identity backend");
    Ok(Arc::new(safecity_session::InMemoryIdentityBackend::new(config.session_ttl)))
}
