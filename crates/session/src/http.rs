//! HTTP identity backend.
//!
//! Talks to the portal API:
//! - `POST {api_url}/auth/register` with `{name, email, role, password}`
//! - `POST {api_url}/auth/login` with `{email, password}`
//! - `POST {api_url}/auth/session` with `{token}`
//!
//! Register and login answer with an [`Authenticated`] JSON body, session
//! with the [`Identity`] the token belongs to.
//!
//! [`Authenticated`]: crate::Authenticated
//! [`Identity`]: safecity_auth::Identity

use serde::Serialize;

use crate::error::BackendError;

#[cfg(feature = "http")]
pub use client::HttpIdentityBackend;

#[cfg_attr(not(feature = "http"), allow(dead_code))]
#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    role: &'a str,
    password: &'a str,
}

#[cfg_attr(not(feature = "http"), allow(dead_code))]
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[cfg_attr(not(feature = "http"), allow(dead_code))]
#[derive(Debug, Serialize)]
struct SessionRequest<'a> {
    token: &'a str,
}

/// Map a non-success HTTP status to a backend error.
pub fn classify_status(status: u16, body: &str) -> BackendError {
    match status {
        409 => BackendError::Conflict,
        401 | 403 => BackendError::InvalidCredentials,
        400 | 422 => BackendError::Rejected(body.trim().to_string()),
        _ => BackendError::Unavailable(format!("API error ({status}): {}", body.trim())),
    }
}

#[cfg(feature = "http")]
mod client {
    use async_trait::async_trait;

    use serde::Serialize;
    use serde::de::DeserializeOwned;

    use safecity_auth::{Email, Identity, Password, Registration, SessionToken};

    use super::{LoginRequest, RegisterRequest, SessionRequest, classify_status};
    use crate::backend::{Authenticated, IdentityBackend};
    use crate::config::SessionConfig;
    use crate::error::BackendError;

    #[derive(Debug, Clone)]
    pub struct HttpIdentityBackend {
        client: reqwest::Client,
        api_url: String,
    }

    impl HttpIdentityBackend {
        pub fn new(config: &SessionConfig) -> Result<Self, BackendError> {
            let client = reqwest::Client::builder()
                .timeout(config.backend_timeout)
                .build()
                .map_err(|e| BackendError::Unavailable(e.to_string()))?;
            Ok(Self {
                client,
                api_url: config.api_url.clone(),
            })
        }

        async fn post<B, R>(&self, route: &str, body: &B) -> Result<R, BackendError>
        where
            B: Serialize + ?Sized,
            R: DeserializeOwned,
        {
            let url = format!("{}{}", self.api_url, route);
            let resp = self
                .client
                .post(&url)
                .json(body)
                .send()
                .await
                .map_err(|e| BackendError::Unavailable(format!("network error: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let text = resp.text().await.unwrap_or_default();
                return Err(classify_status(status.as_u16(), &text));
            }

            resp.json::<R>()
                .await
                .map_err(|e| BackendError::Unavailable(format!("parse error: {e}")))
        }
    }

    #[async_trait]
    impl IdentityBackend for HttpIdentityBackend {
        async fn register(&self, registration: &Registration) -> Result<Authenticated, BackendError> {
            let profile = &registration.profile;
            let body = RegisterRequest {
                name: profile.name.as_str(),
                email: profile.email.as_str(),
                role: profile.role.as_str(),
                password: registration.password.expose(),
            };
            self.post("/auth/register", &body).await
        }

        async fn login(&self, email: &Email, password: &Password) -> Result<Authenticated, BackendError> {
            let body = LoginRequest {
                email: email.as_str(),
                password: password.expose(),
            };
            self.post("/auth/login", &body).await
        }

        async fn resolve(&self, token: &SessionToken) -> Result<Identity, BackendError> {
            let body = SessionRequest {
                token: &token.value,
            };
            self.post("/auth/session", &body).await
        }
    }
}
