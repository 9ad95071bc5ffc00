//! Health check endpoints for Kubernetes probes

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;

use super::state::AppState;

/// Health response, with model details once a model is held
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelInfo>,
}

/// Health check status
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// The model version this process serves
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: u32,
    pub stage: String,
    pub run_id: String,
}

/// Simple health check - returns 200 if the service is running
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check - 200 only while a model is loaded
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let model = state.prediction.as_ref().map(|service| {
        let version = service.version();
        ModelInfo {
            name: version.name().to_string(),
            version: version.version(),
            stage: version.stage().to_string(),
            run_id: version.run_id().to_string(),
        }
    });

    let (status, status_code) = match model {
        Some(_) => (HealthStatus::Healthy, StatusCode::OK),
        None => (HealthStatus::Unhealthy, StatusCode::SERVICE_UNAVAILABLE),
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        model,
    };

    (status_code, Json(response))
}

/// Liveness check
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}
