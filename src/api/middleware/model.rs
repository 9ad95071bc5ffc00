//! Loaded-model guard for prediction routes

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::PredictionError;
use crate::infrastructure::services::PredictionService;

/// Extractor that requires a loaded model
///
/// Runs on the request head, before any body extractor, so a process without
/// a model answers 503 whatever the body holds.
#[derive(Debug, Clone)]
pub struct RequireModel(pub Arc<PredictionService>);

impl FromRequestParts<AppState> for RequireModel {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .prediction
            .clone()
            .map(RequireModel)
            .ok_or_else(|| PredictionError::ModelUnavailable.into())
    }
}
