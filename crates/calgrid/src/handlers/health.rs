//! Health check endpoint.

use axum::Json;
use chrono::Utc;

use calgrid_core::calendar::{ApiResponse, HealthStatus};

/// GET /api/health - Liveness check.
///
/// Returns 200 immediately. Does not touch the event store.
pub async fn health() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::ok(HealthStatus::ok(Utc::now())))
}
