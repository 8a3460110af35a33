//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use dirhub_database::store::DirectoryStore;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// Answers 503 when the store does not respond.
pub async fn health<S: DirectoryStore>(
    State(state): State<AppState<S>>,
) -> (StatusCode, Json<ApiResponse<HealthResponse>>) {
    let healthy = match state.directory_service.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            false
        }
    };
    let (status, code, database) = if healthy {
        ("ok", StatusCode::OK, "up")
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE, "down")
    };

    let body = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.config.database.backend.to_string(),
        database: database.to_string(),
    };
    (
        code,
        Json(ApiResponse {
            success: healthy,
            data: body,
        }),
    )
}
