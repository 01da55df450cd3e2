//! Root liveness endpoint
//!
//! Confirms the process is up and accepting connections; depends on
//! nothing downstream of the gateway.

use axum::Json;
use serde::Serialize;

/// Response for the root liveness endpoint
#[derive(Serialize)]
pub struct LivenessResponse {
    pub message: String,
}

/// Liveness endpoint
///
/// GET /
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: "Bus Booking API is running!".to_string(),
    })
}
