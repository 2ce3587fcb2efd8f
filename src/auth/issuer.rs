use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use super::{AuthError, Claims, SIGNING_ALGORITHM};

/// Fixed lifetime of every issued token.
pub const TOKEN_LIFETIME_MINUTES: i64 = 15;

/// The single identity allowed to obtain tokens.
///
/// Compared as plaintext against configuration. There is no hashing here;
/// the admin identity is fixed at startup rather than stored.
#[derive(Clone)]
pub struct AdminCredential {
    username: String,
    password: String,
}

impl AdminCredential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Mints signed, time-bounded tokens for the configured admin.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    admin: AdminCredential,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>, admin: AdminCredential) -> Self {
        Self {
            secret: secret.into(),
            admin,
        }
    }

    pub fn issue(&self, username: &str, password: &str) -> Result<String, AuthError> {
        self.issue_at(username, password, Utc::now().timestamp())
    }

    /// Issues a token whose `iat` is `now` (unix seconds).
    pub fn issue_at(&self, username: &str, password: &str, now: i64) -> Result<String, AuthError> {
        if !self.admin.matches(username, password) {
            return Err(AuthError::InvalidCredentials);
        }

        if self.secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        let claims = Claims {
            sub: username.to_string(),
            iat: now,
            exp: now + Duration::minutes(TOKEN_LIFETIME_MINUTES).num_seconds(),
        };

        let key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::new(SIGNING_ALGORITHM), &claims, &key)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }
}
