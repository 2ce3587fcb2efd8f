use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /token - Exchange the admin credentials for a signed token
///
/// Expected Input:
/// ```json
/// { "username": "admin", "password": "..." }
/// ```
///
/// The token is valid for 15 minutes and is sent back verbatim in the
/// `Authorization` header of protected requests.
pub async fn post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<TokenResponse> {
    let Json(login) = payload.map_err(|_| ApiError::bad_request("Invalid request payload"))?;
    if login.username.is_empty() || login.password.is_empty() {
        return Err(ApiError::bad_request("Invalid request payload"));
    }

    let token = state.issuer.issue(&login.username, &login.password).map_err(|e| {
        tracing::warn!(username = %login.username, reason = %e, "token request refused");
        ApiError::from(e)
    })?;

    tracing::info!(username = %login.username, "token issued");
    Ok(ApiResponse::ok("Token generated successfully", TokenResponse { token }))
}
