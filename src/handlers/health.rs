use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "TaskFlow API is running".to_string(),
    })
}

/// Database connectivity probe
#[utoipa::path(
    get,
    path = "/api/v1/health/db",
    responses(
        (status = 200, description = "Database connection is healthy", body = HealthResponse),
        (status = 500, description = "Database unreachable")
    ),
    tag = "Health"
)]
pub async fn health_check_db(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    sqlx::query("SELECT 1").execute(&state.pg_pool).await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        message: "Database connection is healthy".to_string(),
    }))
}
