//! Model registry trait

use async_trait::async_trait;

use super::{ModelArtifact, ModelName, ModelUri, ModelVersion, Stage, VersionSelector};
use crate::domain::tracking::{RunStatus, TrackingRun};
use crate::domain::DomainError;

/// Tracking and model-registry operations shared by the training job and the server
#[async_trait]
pub trait ModelRegistry: Send + Sync + std::fmt::Debug {
    /// Open a new run under the given experiment
    async fn create_run(&self, experiment: &str) -> Result<TrackingRun, DomainError>;

    /// Get a run by ID
    async fn get_run(&self, run_id: &str) -> Result<Option<TrackingRun>, DomainError>;

    /// Record a parameter on an active run
    async fn log_param(&self, run_id: &str, key: &str, value: &str) -> Result<(), DomainError>;

    /// Record a metric on an active run
    async fn log_metric(&self, run_id: &str, key: &str, value: f64) -> Result<(), DomainError>;

    /// Close a run with a terminal status
    async fn finish_run(&self, run_id: &str, status: RunStatus)
        -> Result<TrackingRun, DomainError>;

    /// Store the artifact as the next version of `name`, creating the model if needed
    async fn register_model_version(
        &self,
        name: &ModelName,
        run_id: &str,
        artifact: &ModelArtifact,
    ) -> Result<ModelVersion, DomainError>;

    /// All versions of a model, ascending by version number
    async fn list_versions(&self, name: &ModelName) -> Result<Vec<ModelVersion>, DomainError>;

    /// Move a version to a stage. Any other version holding an exclusive stage is archived.
    async fn transition_stage(
        &self,
        name: &ModelName,
        version: u32,
        stage: Stage,
    ) -> Result<ModelVersion, DomainError>;

    /// Read the artifact stored with a version
    async fn load_artifact(
        &self,
        name: &ModelName,
        version: u32,
    ) -> Result<ModelArtifact, DomainError>;

    /// Highest version currently holding `stage`
    async fn latest_version(
        &self,
        name: &ModelName,
        stage: Stage,
    ) -> Result<Option<ModelVersion>, DomainError> {
        Ok(self
            .list_versions(name)
            .await?
            .into_iter()
            .filter(|v| v.stage() == stage)
            .max_by_key(|v| v.version()))
    }

    /// Resolve a `models:/` URI to a concrete version
    async fn resolve(&self, uri: &ModelUri) -> Result<ModelVersion, DomainError> {
        let versions = self.list_versions(&uri.name).await?;

        if versions.is_empty() {
            return Err(DomainError::not_found(format!(
                "Registered model '{}' not found",
                uri.name
            )));
        }

        let found = match uri.selector {
            VersionSelector::Stage(stage) => versions
                .into_iter()
                .filter(|v| v.stage() == stage)
                .max_by_key(|v| v.version()),
            VersionSelector::Version(number) => {
                versions.into_iter().find(|v| v.version() == number)
            }
        };

        found.ok_or_else(|| {
            DomainError::not_found(format!(
                "No version of model '{}' matches '{}'",
                uri.name, uri.selector
            ))
        })
    }

    /// Resolve a URI and load its artifact
    async fn load_model(
        &self,
        uri: &ModelUri,
    ) -> Result<(ModelVersion, ModelArtifact), DomainError> {
        let version = self.resolve(uri).await?;
        let artifact = self.load_artifact(version.name(), version.version()).await?;
        Ok((version, artifact))
    }
}
