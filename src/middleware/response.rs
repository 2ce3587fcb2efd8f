use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Uniform `{message, data}` body carried by every response.
///
/// `data` serializes as `null` for errors and for operations without a
/// natural payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Successful handler outcome: an envelope plus the status it goes out with
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub envelope: Envelope<T>,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK carrying `data`
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_status(Envelope::new(message, data), StatusCode::OK)
    }

    /// 201 Created carrying `data`
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(Envelope::new(message, data), StatusCode::CREATED)
    }

    /// 200 OK with `data: null`
    pub fn empty(message: impl Into<String>) -> Self {
        Self::with_status(Envelope::empty(message), StatusCode::OK)
    }

    pub fn with_status(envelope: Envelope<T>, status_code: StatusCode) -> Self {
        Self {
            envelope,
            status_code,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status_code, self.envelope).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
