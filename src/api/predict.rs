//! `POST /predict`

use axum::http::StatusCode;
use tracing::debug;

use crate::api::middleware::RequireModel;
use crate::api::types::{ApiError, Json, PredictRequest, PredictResponse};

/// Label each row of `data` with the loaded model
pub async fn predict(
    RequireModel(service): RequireModel,
    Json(request): Json<PredictRequest>,
) -> Result<(StatusCode, Json<PredictResponse>), ApiError> {
    debug!(rows = request.data.len(), "Prediction request");

    let rows = request.into_rows()?;
    let predictions = service.predict(&rows)?;

    Ok((StatusCode::OK, Json(PredictResponse { predictions })))
}
