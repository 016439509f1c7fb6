//! System/health API handlers.
//!
//! # Purpose
//! Lightweight endpoints for service metadata and probes. Health checks the
//! backend client handle so readiness reflects dependency availability.
use crate::api::error::{ApiError, api_internal_message};
use crate::api::types::{HealthStatus, SystemInfo};
use crate::app::AppState;
use axum::Json;
use axum::extract::State;

#[utoipa::path(
    get,
    path = "/v1/system/info",
    tag = "system",
    responses(
        (status = 200, description = "Service identity and backend", body = SystemInfo)
    )
)]
pub(crate) async fn system_info(State(state): State<AppState>) -> Json<SystemInfo> {
    Json(SystemInfo {
        project_id: state.admin.project_id().to_string(),
        api_version: state.api_version.clone(),
        backend: state.admin.backend_name().to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/v1/system/health",
    tag = "system",
    responses(
        (status = 200, description = "Service health", body = HealthStatus),
        (status = 500, description = "Backend unreachable", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn system_health(
    State(state): State<AppState>,
) -> Result<Json<HealthStatus>, ApiError> {
    if let Err(err) = state.admin.health_check().await {
        tracing::error!(error = %err, "backend health check failed");
        return Err(api_internal_message("backend unavailable"));
    }
    Ok(Json(HealthStatus {
        status: "ok".to_string(),
    }))
}
