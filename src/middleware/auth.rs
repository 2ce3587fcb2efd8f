use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName},
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, CredentialVerifier};
use crate::error::ApiError;

/// Guards protected routes: no valid token, no handler.
#[derive(Clone)]
pub struct AuthGate {
    verifier: CredentialVerifier,
    header: HeaderName,
}

impl AuthGate {
    pub fn new(verifier: CredentialVerifier) -> Self {
        Self {
            verifier,
            header: header::AUTHORIZATION,
        }
    }

    /// Admits the request when the designated header holds a token that verifies.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let token = extract_token(headers, &self.header)?;
        let claims = self.verifier.verify(token)?;
        tracing::debug!(sub = %claims.sub, "token accepted");
        Ok(())
    }
}

/// JWT authentication middleware. The request is forwarded unchanged; claims
/// are not attached to it.
pub async fn require_token(
    State(gate): State<AuthGate>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(reason) = gate.check(request.headers()) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            reason = %reason,
            "rejected unauthenticated request"
        );
        return Err(reason.into());
    }

    Ok(next.run(request).await)
}

/// The header carries the raw token, without a `Bearer ` scheme prefix.
fn extract_token<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Result<&'a str, AuthError> {
    let value = headers.get(name).ok_or(AuthError::MissingCredential)?;
    let token = value.to_str().map_err(|_| AuthError::MalformedToken)?.trim();
    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AdminCredential, TokenIssuer};
    use axum::http::HeaderValue;

    fn gate() -> AuthGate {
        AuthGate::new(CredentialVerifier::new("gate-secret"))
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_missing_credential() {
        assert_eq!(gate().check(&HeaderMap::new()), Err(AuthError::MissingCredential));
    }

    #[test]
    fn blank_header_is_missing_credential() {
        assert_eq!(gate().check(&headers_with("  ")), Err(AuthError::MissingCredential));
    }

    #[test]
    fn raw_token_is_admitted() {
        let token = TokenIssuer::new("gate-secret", AdminCredential::new("admin", "Password"))
            .issue("admin", "Password")
            .unwrap();
        assert_eq!(gate().check(&headers_with(&token)), Ok(()));
    }

    #[test]
    fn bearer_prefix_is_not_stripped() {
        let token = TokenIssuer::new("gate-secret", AdminCredential::new("admin", "Password"))
            .issue("admin", "Password")
            .unwrap();
        let result = gate().check(&headers_with(&format!("Bearer {token}")));
        assert_eq!(result, Err(AuthError::MalformedToken));
    }
}
