//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub dataset: DatasetStatus,
}

/// Status of the dataset backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStatus {
    pub healthy: bool,
    pub backend: Option<String>,
    pub observation_count: Option<u64>,
    pub response_time_ms: Option<u64>,
}

/// Readiness check - can the dataset be queried?
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let dataset = match state.dataset_health.check_health().await {
        Ok(health) => DatasetStatus {
            healthy: health.reachable,
            backend: health.backend,
            observation_count: health.observation_count,
            response_time_ms: health.response_time_ms,
        },
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            DatasetStatus {
                healthy: false,
                backend: None,
                observation_count: None,
                response_time_ms: None,
            }
        },
    };

    let ready = dataset.healthy;
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(ReadinessResponse { ready, dataset }))
}
