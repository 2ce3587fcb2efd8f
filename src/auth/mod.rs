//! Token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying `{sub, iat, exp}`. The server keeps only
//! the shared secret; a token's validity is recomputed from its signature
//! and `exp` on every request.

pub mod issuer;
pub mod verifier;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use issuer::{AdminCredential, TokenIssuer, TOKEN_LIFETIME_MINUTES};
pub use verifier::CredentialVerifier;

/// The only algorithm the server signs with or accepts.
pub const SIGNING_ALGORITHM: jsonwebtoken::Algorithm = jsonwebtoken::Algorithm::HS256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("token could not be parsed")]
    MalformedToken,

    #[error("token signed with unsupported algorithm '{0}'")]
    AlgorithmMismatch(String),

    #[error("token signature does not verify")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("no credential supplied")]
    MissingCredential,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
}
