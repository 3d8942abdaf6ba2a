//! Liveness and readiness endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

use core_kernel::{HealthCheckResult, HealthCheckable};

use crate::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Storage health, only reported by readiness
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<HealthCheckResult>,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: VERSION,
        storage: None,
    })
}

/// Ready once the invitation storage answers a health check
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let storage = state.invitations.port().health_check().await;

    if storage.is_operational() {
        return (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ready",
                version: VERSION,
                storage: Some(storage),
            }),
        );
    }

    warn!(adapter = %storage.adapter_id, message = ?storage.message, "Storage adapter not ready");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(HealthResponse {
            status: "unavailable",
            version: VERSION,
            storage: Some(storage),
        }),
    )
}
