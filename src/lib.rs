//! Iris MLOps
//!
//! A training job and a prediction server sharing one model registry:
//! - `train` fits a logistic regression on the iris dataset, records the run
//!   and registers a new model version
//! - `promote` moves a version to a registry stage
//! - `serve` loads the version holding a stage and answers `POST /predict`

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use anyhow::Context;
use tracing::info;

use api::state::AppState;
use domain::ModelUri;
use infrastructure::registry::RegistryFactory;
use infrastructure::services::PredictionService;

/// The registry URI the server loads from: `models:/<name>/<stage>`
pub fn serving_model_uri(config: &AppConfig) -> anyhow::Result<ModelUri> {
    let uri = format!(
        "models:/{}/{}",
        config.serving.model_name, config.serving.model_stage
    );

    uri.parse()
        .with_context(|| format!("Invalid model reference '{}'", uri))
}

/// Resolve and load the serving model. Any failure here is fatal for the server.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let uri = serving_model_uri(config)?;
    let registry = RegistryFactory::from_tracking_uri(config.registry.tracking_uri.as_deref())
        .context("Failed to open model registry")?;

    info!(
        tracking_uri = config.registry.tracking_uri.as_deref().unwrap_or("<default>"),
        "Model registry opened"
    );

    let service = PredictionService::load(registry.as_ref(), &uri)
        .await
        .with_context(|| format!("Failed to load model '{}'", uri))?;

    Ok(AppState::loaded(service))
}
