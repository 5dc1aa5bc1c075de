//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: link store ping
/// 2. **Codec**: id `0` encodes and decodes back to itself
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected" },
///     "codec": { "status": "ok", "message": "Alphabet of 36 chars, min length 0" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;

    let codec_check = check_codec(&state);

    let all_healthy = db_check.is_ok() && codec_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            codec: codec_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.link_service.ping().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Database error: {}", e)),
    }
}

/// Round-trips id 0 through the configured codec.
fn check_codec(state: &AppState) -> CheckStatus {
    let codec = state.link_service.codec();

    match codec.encode_id(0) {
        Ok(code) if codec.decode_id(&code) == Some(0) => CheckStatus::ok(format!(
            "Alphabet of {} chars, min length {}",
            codec.alphabet_len(),
            codec.min_length()
        )),
        Ok(code) => CheckStatus::error(format!("Code '{}' does not decode to 0", code)),
        Err(e) => CheckStatus::error(format!("Codec error: {}", e)),
    }
}
