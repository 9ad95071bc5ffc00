//! Promote command - operator stage transition

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{ModelName, ModelRegistry, ModelVersion, Stage};
use crate::infrastructure::logging;
use crate::infrastructure::registry::RegistryFactory;

/// Arguments for the promote command
#[derive(Args, Debug, Clone)]
pub struct PromoteArgs {
    /// Registered model name
    pub name: String,

    /// Version number to move
    pub version: u32,

    /// Target stage: None, Staging, Production or Archived
    pub stage: Stage,
}

/// Move a version to a stage, archiving the previous holder
pub async fn run(args: PromoteArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging)?;

    let version = promote(&config, &args).await?;

    info!(
        model = %version.name(),
        version = version.version(),
        stage = %version.stage(),
        "Stage transition complete"
    );

    Ok(())
}

async fn promote(config: &AppConfig, args: &PromoteArgs) -> anyhow::Result<ModelVersion> {
    let name = ModelName::new(args.name.clone())?;
    let registry = RegistryFactory::from_tracking_uri(config.registry.tracking_uri.as_deref())
        .context("Failed to open model registry")?;

    registry
        .transition_stage(&name, args.version, args.stage)
        .await
        .with_context(|| {
            format!(
                "Failed to move version {} of '{}' to {}",
                args.version, name, args.stage
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_promote_unknown_model_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.registry.tracking_uri = Some(dir.path().display().to_string());

        let args = PromoteArgs {
            name: "IrisLogisticRegressionModel".to_string(),
            version: 1,
            stage: Stage::Production,
        };

        let err = promote(&config, &args).await.unwrap_err();
        assert!(format!("{:#}", err).contains("not found"));
    }

    #[tokio::test]
    async fn test_promote_rejects_invalid_name() {
        let args = PromoteArgs {
            name: "../escape".to_string(),
            version: 1,
            stage: Stage::Production,
        };

        assert!(promote(&AppConfig::default(), &args).await.is_err());
    }
}
