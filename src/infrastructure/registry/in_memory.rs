//! In-memory model registry

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::registry::apply_stage_transition;
use crate::domain::{
    DomainError, ModelArtifact, ModelName, ModelRegistry, ModelVersion, RunStatus, Stage,
    TrackingRun,
};

#[derive(Debug, Default)]
struct RegistryState {
    runs: HashMap<String, TrackingRun>,
    versions: HashMap<ModelName, Vec<ModelVersion>>,
    artifacts: HashMap<(ModelName, u32), ModelArtifact>,
}

/// Thread-safe in-memory registry
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryModelRegistry {
    state: RwLock<RegistryState>,
}

impl InMemoryModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, RegistryState>, DomainError> {
        self.state
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, RegistryState>, DomainError> {
        self.state
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// All runs recorded so far, in no particular order
    #[cfg(test)]
    pub(crate) fn runs(&self) -> Vec<TrackingRun> {
        self.read()
            .map(|state| state.runs.values().cloned().collect())
            .unwrap_or_default()
    }

    fn with_active_run<F>(&self, run_id: &str, update: F) -> Result<TrackingRun, DomainError>
    where
        F: FnOnce(&mut TrackingRun),
    {
        let mut state = self.write()?;
        let run = state
            .runs
            .get_mut(run_id)
            .ok_or_else(|| DomainError::not_found(format!("Run '{}' not found", run_id)))?;

        if !run.is_active() {
            return Err(DomainError::conflict(format!(
                "Run '{}' is already {}",
                run_id,
                run.status()
            )));
        }

        update(run);
        Ok(run.clone())
    }
}

#[async_trait]
impl ModelRegistry for InMemoryModelRegistry {
    async fn create_run(&self, experiment: &str) -> Result<TrackingRun, DomainError> {
        let run = TrackingRun::start(experiment);
        self.write()?
            .runs
            .insert(run.run_id().to_string(), run.clone());
        Ok(run)
    }

    async fn get_run(&self, run_id: &str) -> Result<Option<TrackingRun>, DomainError> {
        Ok(self.read()?.runs.get(run_id).cloned())
    }

    async fn log_param(&self, run_id: &str, key: &str, value: &str) -> Result<(), DomainError> {
        self.with_active_run(run_id, |run| run.set_param(key, value))?;
        Ok(())
    }

    async fn log_metric(&self, run_id: &str, key: &str, value: f64) -> Result<(), DomainError> {
        self.with_active_run(run_id, |run| run.set_metric(key, value))?;
        Ok(())
    }

    async fn finish_run(
        &self,
        run_id: &str,
        status: RunStatus,
    ) -> Result<TrackingRun, DomainError> {
        self.with_active_run(run_id, |run| run.finish(status))
    }

    async fn register_model_version(
        &self,
        name: &ModelName,
        run_id: &str,
        artifact: &ModelArtifact,
    ) -> Result<ModelVersion, DomainError> {
        let mut state = self.write()?;

        if !state.runs.contains_key(run_id) {
            return Err(DomainError::not_found(format!("Run '{}' not found", run_id)));
        }

        let versions = state.versions.entry(name.clone()).or_default();
        let next = versions.iter().map(|v| v.version()).max().unwrap_or(0) + 1;
        let version = ModelVersion::new(name.clone(), next, run_id);
        versions.push(version.clone());

        state
            .artifacts
            .insert((name.clone(), next), artifact.clone());

        Ok(version)
    }

    async fn list_versions(&self, name: &ModelName) -> Result<Vec<ModelVersion>, DomainError> {
        let mut versions = self.read()?.versions.get(name).cloned().unwrap_or_default();
        versions.sort_by_key(|v| v.version());
        Ok(versions)
    }

    async fn transition_stage(
        &self,
        name: &ModelName,
        version: u32,
        stage: Stage,
    ) -> Result<ModelVersion, DomainError> {
        let mut state = self.write()?;
        let versions = state
            .versions
            .get_mut(name)
            .ok_or_else(|| DomainError::not_found(format!("Registered model '{}' not found", name)))?;

        Ok(apply_stage_transition(name, versions, version, stage)?.target)
    }

    async fn load_artifact(
        &self,
        name: &ModelName,
        version: u32,
    ) -> Result<ModelArtifact, DomainError> {
        self.read()?
            .artifacts
            .get(&(name.clone(), version))
            .cloned()
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "No artifact stored for version {} of model '{}'",
                    version, name
                ))
            })
    }
}
