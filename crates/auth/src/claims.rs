use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque session credential issued by the identity backend.
///
/// The client never interprets the value. It checks the lifetime locally and
/// asks the backend which identity the value stands for.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub value: String,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// Mint a random token valid for `ttl` from `now`.
    pub fn issue(now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            value: uuid::Uuid::new_v4().simple().to_string(),
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    /// Check the token's lifetime against `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        if self.expires_at <= self.issued_at {
            Err(TokenError::EmptyWindow)
        } else if now < self.issued_at {
            Err(TokenError::NotYetIssued(self.issued_at))
        } else if now >= self.expires_at {
            Err(TokenError::Expired(self.expires_at))
        } else {
            Ok(())
        }
    }
}

impl core::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionToken")
            .field("value", &"***")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("session expired at {0}")]
    Expired(DateTime<Utc>),

    #[error("session starts at {0}")]
    NotYetIssued(DateTime<Utc>),

    #[error("session has an empty lifetime")]
    EmptyWindow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_is_valid() {
        let now = Utc::now();
        let token = SessionToken::issue(now, Duration::hours(1));
        assert_eq!(token.validate(now), Ok(()));
        assert_eq!(token.value.len(), 32);
    }

    #[test]
    fn expired_token() {
        let now = Utc::now();
        let token = SessionToken::issue(now, Duration::minutes(5));
        assert_eq!(
            token.validate(now + Duration::minutes(5)),
            Err(TokenError::Expired(token.expires_at))
        );
    }

    #[test]
    fn token_from_the_future() {
        let now = Utc::now();
        let token = SessionToken::issue(now + Duration::minutes(1), Duration::hours(1));
        assert_eq!(token.validate(now), Err(TokenError::NotYetIssued(token.issued_at)));
    }

    #[test]
    fn zero_lifetime_is_never_valid() {
        let now = Utc::now();
        let token = SessionToken::issue(now, Duration::zero());
        assert_eq!(token.validate(now), Err(TokenError::EmptyWindow));
    }

    #[test]
    fn debug_hides_value() {
        let token = SessionToken::issue(Utc::now(), Duration::hours(1));
        assert!(!format!("{token:?}").contains(&token.value));
    }
}
