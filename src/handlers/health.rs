use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::app::AppState;
use crate::middleware::response::{ApiResponse, Envelope};

/// GET /health - Liveness plus a store round trip
pub async fn get(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => ApiResponse::ok(
            "ok",
            json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            }),
        )
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            ApiResponse::with_status(
                Envelope::new(
                    "store unavailable",
                    json!({
                        "status": "degraded",
                        "timestamp": now
                    }),
                ),
                StatusCode::SERVICE_UNAVAILABLE,
            )
            .into_response()
        }
    }
}
