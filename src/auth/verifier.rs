use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};
use serde::Deserialize;

use super::{AuthError, Claims, SIGNING_ALGORITHM};

/// Checks inbound tokens against the shared signing secret.
#[derive(Clone)]
pub struct CredentialVerifier {
    secret: String,
}

/// Just enough of the JOSE header to read `alg` before trusting anything else.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

impl CredentialVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verifies `token` as of `now` (unix seconds).
    ///
    /// Checks run in order: secret configured, token shape, declared
    /// algorithm, signature, expiry. A token is expired once `now >= exp`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::MissingSecret);
        }

        let alg = declared_algorithm(token)?;
        if alg != "HS256" {
            return Err(AuthError::AlgorithmMismatch(alg));
        }

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        // exp is compared below without leeway
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let claims = decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => {
                    AuthError::AlgorithmMismatch(format!("{:?}", SIGNING_ALGORITHM))
                }
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::MalformedToken,
            })?;

        if now >= claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }
}

fn declared_algorithm(token: &str) -> Result<String, AuthError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_), Some(_), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return Err(AuthError::MalformedToken);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| AuthError::MalformedToken)?;
    let raw: RawHeader = serde_json::from_slice(&bytes).map_err(|_| AuthError::MalformedToken)?;
    Ok(raw.alg)
}
