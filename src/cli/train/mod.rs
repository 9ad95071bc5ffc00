//! Train command - runs the training job once and exits

use anyhow::Context;
use tracing::info;

use crate::config::{AppConfig, TrainingJobConfig};
use crate::infrastructure::logging;
use crate::infrastructure::registry::RegistryFactory;
use crate::infrastructure::services::{TrainingReport, TrainingService};

/// Fit, score and register one new model version
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Only the logging section applies; the job itself is fixed
    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging)?;

    let report = train(TrainingJobConfig::default()).await?;

    info!(
        run_id = %report.run_id,
        model = %report.model_name,
        version = report.version,
        accuracy = report.accuracy,
        "Training job complete"
    );

    Ok(())
}

async fn train(job: TrainingJobConfig) -> anyhow::Result<TrainingReport> {
    let registry = RegistryFactory::from_tracking_uri(Some(&job.tracking_uri))
        .context("Failed to open model registry")?;

    TrainingService::new(registry, job)
        .run()
        .await
        .context("Training job failed")
}
