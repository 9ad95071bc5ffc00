//! File-based model registry
//!
//! Layout under the root directory:
//!
//! ```text
//! runs/<run_id>.json
//! models/<name>/<version>/model.json
//! models/<name>/<version>/version.json
//! ```
//!
//! Every file is written to a temporary sibling and renamed into place. The
//! artifact lands before `version.json`, and a version directory without
//! `version.json` is ignored, so a half-written registration is never visible.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::registry::apply_stage_transition;
use crate::domain::{
    DomainError, ModelArtifact, ModelName, ModelRegistry, ModelVersion, RunStatus, Stage,
    TrackingRun,
};

const RUNS_DIR: &str = "runs";
const MODELS_DIR: &str = "models";
const VERSION_FILE: &str = "version.json";
const ARTIFACT_FILE: &str = "model.json";

/// Registry persisted as JSON files below a root directory
#[derive(Debug)]
pub struct FileModelRegistry {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileModelRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn run_path(&self, run_id: &str) -> Result<PathBuf, DomainError> {
        if run_id.is_empty() || !run_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomainError::validation(format!("Invalid run id '{}'", run_id)));
        }

        Ok(self.root.join(RUNS_DIR).join(format!("{}.json", run_id)))
    }

    fn model_dir(&self, name: &ModelName) -> PathBuf {
        self.root.join(MODELS_DIR).join(name.as_str())
    }

    fn version_dir(&self, name: &ModelName, version: u32) -> PathBuf {
        self.model_dir(name).join(version.to_string())
    }

    async fn read_run(&self, run_id: &str) -> Result<Option<TrackingRun>, DomainError> {
        read_json(&self.run_path(run_id)?).await
    }

    async fn update_active_run<F>(&self, run_id: &str, update: F) -> Result<TrackingRun, DomainError>
    where
        F: FnOnce(&mut TrackingRun) + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut run = self
            .read_run(run_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Run '{}' not found", run_id)))?;

        if !run.is_active() {
            return Err(DomainError::conflict(format!(
                "Run '{}' is already {}",
                run_id,
                run.status()
            )));
        }

        update(&mut run);
        write_json_atomic(&self.run_path(run_id)?, &run).await?;
        Ok(run)
    }

    async fn read_versions(&self, name: &ModelName) -> Result<Vec<ModelVersion>, DomainError> {
        let dir = self.model_dir(name);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(storage_error(&dir, e)),
        };

        let mut versions = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(|e| storage_error(&dir, e))? {
            let Some(number) = entry
                .file_name()
                .to_str()
                .and_then(|s| s.parse::<u32>().ok())
            else {
                continue;
            };

            match read_json::<ModelVersion>(&entry.path().join(VERSION_FILE)).await? {
                Some(version) => versions.push(version),
                None => warn!(
                    model = %name,
                    version = number,
                    "Skipping version directory without metadata"
                ),
            }
        }

        versions.sort_by_key(|v| v.version());
        Ok(versions)
    }

    /// Reserve the next version number by creating its directory.
    ///
    /// `create_dir` fails if the directory exists, so two processes sharing the
    /// root can never claim the same number; the loser moves on to the next one.
    async fn claim_version_dir(&self, name: &ModelName) -> Result<(u32, PathBuf), DomainError> {
        let model_dir = self.model_dir(name);
        fs::create_dir_all(&model_dir)
            .await
            .map_err(|e| storage_error(&model_dir, e))?;

        let mut number = self.highest_allocated_version(name).await? + 1;
        loop {
            let dir = self.version_dir(name, number);
            match fs::create_dir(&dir).await {
                Ok(()) => return Ok((number, dir)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!(model = %name, version = number, "Version already claimed, trying next");
                    number = number.checked_add(1).ok_or_else(|| {
                        DomainError::conflict(format!("No version numbers left for model '{}'", name))
                    })?;
                }
                Err(e) => return Err(storage_error(&dir, e)),
            }
        }
    }

    /// Highest number in use, counting directories left by interrupted registrations
    async fn highest_allocated_version(&self, name: &ModelName) -> Result<u32, DomainError> {
        let dir = self.model_dir(name);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(storage_error(&dir, e)),
        };

        let mut highest = 0;
        while let Some(entry) = entries.next_entry().await.map_err(|e| storage_error(&dir, e))? {
            if let Some(number) = entry.file_name().to_str().and_then(|s| s.parse::<u32>().ok()) {
                highest = highest.max(number);
            }
        }

        Ok(highest)
    }
}

#[async_trait]
impl ModelRegistry for FileModelRegistry {
    async fn create_run(&self, experiment: &str) -> Result<TrackingRun, DomainError> {
        let _guard = self.write_lock.lock().await;
        let run = TrackingRun::start(experiment);

        write_json_atomic(&self.run_path(run.run_id())?, &run).await?;
        debug!(run_id = %run.run_id(), experiment = %experiment, "Created tracking run");

        Ok(run)
    }

    async fn get_run(&self, run_id: &str) -> Result<Option<TrackingRun>, DomainError> {
        self.read_run(run_id).await
    }

    async fn log_param(&self, run_id: &str, key: &str, value: &str) -> Result<(), DomainError> {
        self.update_active_run(run_id, |run| run.set_param(key, value))
            .await?;
        Ok(())
    }

    async fn log_metric(&self, run_id: &str, key: &str, value: f64) -> Result<(), DomainError> {
        self.update_active_run(run_id, |run| run.set_metric(key, value))
            .await?;
        Ok(())
    }

    async fn finish_run(
        &self,
        run_id: &str,
        status: RunStatus,
    ) -> Result<TrackingRun, DomainError> {
        self.update_active_run(run_id, |run| run.finish(status)).await
    }

    async fn register_model_version(
        &self,
        name: &ModelName,
        run_id: &str,
        artifact: &ModelArtifact,
    ) -> Result<ModelVersion, DomainError> {
        let _guard = self.write_lock.lock().await;

        if self.read_run(run_id).await?.is_none() {
            return Err(DomainError::not_found(format!("Run '{}' not found", run_id)));
        }

        let (number, dir) = self.claim_version_dir(name).await?;

        let version = ModelVersion::new(name.clone(), number, run_id);
        write_json_atomic(&dir.join(ARTIFACT_FILE), artifact).await?;
        write_json_atomic(&dir.join(VERSION_FILE), &version).await?;

        debug!(model = %name, version = number, run_id = %run_id, "Registered model version");
        Ok(version)
    }

    async fn list_versions(&self, name: &ModelName) -> Result<Vec<ModelVersion>, DomainError> {
        self.read_versions(name).await
    }

    async fn transition_stage(
        &self,
        name: &ModelName,
        version: u32,
        stage: Stage,
    ) -> Result<ModelVersion, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut versions = self.read_versions(name).await?;
        if versions.is_empty() {
            return Err(DomainError::not_found(format!(
                "Registered model '{}' not found",
                name
            )));
        }

        let transition = apply_stage_transition(name, &mut versions, version, stage)?;

        for archived in &transition.archived {
            let path = self.version_dir(name, archived.version()).join(VERSION_FILE);
            write_json_atomic(&path, archived).await?;
        }

        let path = self.version_dir(name, version).join(VERSION_FILE);
        write_json_atomic(&path, &transition.target).await?;

        Ok(transition.target)
    }

    async fn load_artifact(
        &self,
        name: &ModelName,
        version: u32,
    ) -> Result<ModelArtifact, DomainError> {
        let path = self.version_dir(name, version).join(ARTIFACT_FILE);

        read_json(&path).await?.ok_or_else(|| {
            DomainError::not_found(format!(
                "No artifact stored for version {} of model '{}'",
                version, name
            ))
        })
    }
}

fn storage_error(path: &Path, err: std::io::Error) -> DomainError {
    DomainError::storage(format!("{}: {}", path.display(), err))
}

/// Read and decode a JSON file; a missing file is `Ok(None)`
async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, DomainError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(storage_error(path, e)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| DomainError::serialization(format!("{}: {}", path.display(), e)))
}

async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), DomainError> {
    let parent = path
        .parent()
        .ok_or_else(|| DomainError::internal(format!("{} has no parent", path.display())))?;
    fs::create_dir_all(parent)
        .await
        .map_err(|e| storage_error(parent, e))?;

    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = parent.join(format!(".tmp-{}", Uuid::new_v4().simple()));

    fs::write(&tmp, &bytes)
        .await
        .map_err(|e| storage_error(&tmp, e))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| storage_error(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::iris::{self, FEATURE_NAMES};
    use crate::domain::{LogisticRegression, ModelUri};

    fn name() -> ModelName {
        ModelName::new("IrisLogisticRegressionModel").unwrap()
    }

    fn artifact() -> ModelArtifact {
        let dataset = iris::load();
        let mut model = LogisticRegression::new();
        model.fit(dataset.features(), dataset.targets()).unwrap();
        ModelArtifact::logistic_regression(
            FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            model,
        )
    }

    #[tokio::test]
    async fn test_runs_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let run_id = {
            let registry = FileModelRegistry::new(dir.path());
            let run = registry.create_run("Iris_Classification").await.unwrap();
            registry.log_param(run.run_id(), "C", "1").await.unwrap();
            registry.log_metric(run.run_id(), "accuracy", 0.9).await.unwrap();
            registry.finish_run(run.run_id(), RunStatus::Finished).await.unwrap();
            run.run_id().to_string()
        };

        let reopened = FileModelRegistry::new(dir.path());
        let run = reopened.get_run(&run_id).await.unwrap().unwrap();

        assert_eq!(run.status(), RunStatus::Finished);
        assert_eq!(run.params()["C"], "1");
        assert_eq!(run.metrics()["accuracy"], 0.9);
    }

    #[tokio::test]
    async fn test_missing_model_has_no_versions() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FileModelRegistry::new(dir.path());

        assert!(registry.list_versions(&name()).await.unwrap().is_empty());
        let err = registry
            .resolve(&ModelUri::for_stage(name(), Stage::Production))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_register_promote_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FileModelRegistry::new(dir.path());
        let run = registry.create_run("exp").await.unwrap();
        let stored = artifact();

        let v1 = registry.register_model_version(&name(), run.run_id(), &stored).await.unwrap();
        let v2 = registry.register_model_version(&name(), run.run_id(), &stored).await.unwrap();
        assert_eq!((v1.version(), v2.version()), (1, 2));

        registry.transition_stage(&name(), 1, Stage::Production).await.unwrap();
        registry.transition_stage(&name(), 2, Stage::Production).await.unwrap();

        let reopened = FileModelRegistry::new(dir.path());
        let versions = reopened.list_versions(&name()).await.unwrap();
        assert_eq!(versions[0].stage(), Stage::Archived);
        assert_eq!(versions[1].stage(), Stage::Production);

        let (version, loaded) = reopened
            .load_model(&ModelUri::for_stage(name(), Stage::Production))
            .await
            .unwrap();
        assert_eq!(version.version(), 2);
        assert_eq!(loaded, stored);
    }

    #[tokio::test]
    async fn test_partial_version_is_invisible() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FileModelRegistry::new(dir.path());
        let run = registry.create_run("exp").await.unwrap();

        std::fs::create_dir_all(dir.path().join("models").join(name().as_str()).join("1")).unwrap();

        assert!(registry.list_versions(&name()).await.unwrap().is_empty());

        let version = registry
            .register_model_version(&name(), run.run_id(), &artifact())
            .await
            .unwrap();
        assert_eq!(version.version(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_artifact_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FileModelRegistry::new(dir.path());
        let run = registry.create_run("exp").await.unwrap();
        registry
            .register_model_version(&name(), run.run_id(), &artifact())
            .await
            .unwrap();

        let path = dir.path().join("models").join(name().as_str()).join("1").join("model.json");
        std::fs::write(&path, b"{not json").unwrap();

        let err = registry.load_artifact(&name(), 1).await.unwrap_err();
        assert!(matches!(err, DomainError::Serialization { .. }));
    }

    #[tokio::test]
    async fn test_run_id_cannot_escape_root() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FileModelRegistry::new(dir.path());

        let err = registry.get_run("../../etc/passwd").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_writers_never_share_a_version() {
        let dir = tempfile::tempdir().unwrap();
        let first = FileModelRegistry::new(dir.path());
        let second = FileModelRegistry::new(dir.path());
        let stored = artifact();

        let run_a = first.create_run("exp").await.unwrap();
        let run_b = second.create_run("exp").await.unwrap();

        let mut numbers = Vec::new();
        for _ in 0..20 {
            let (name_a, name_b) = (name(), name());
            let (a, b) = tokio::join!(
                first.register_model_version(&name_a, run_a.run_id(), &stored),
                second.register_model_version(&name_b, run_b.run_id(), &stored),
            );
            let (a, b) = (a.unwrap(), b.unwrap());
            assert_ne!(a.version(), b.version());
            numbers.push(a.version());
            numbers.push(b.version());
        }

        numbers.sort_unstable();
        assert_eq!(numbers, (1..=40).collect::<Vec<u32>>());

        let versions = first.list_versions(&name()).await.unwrap();
        assert_eq!(versions.len(), 40);
        let from_a = versions.iter().filter(|v| v.run_id() == run_a.run_id()).count();
        assert_eq!(from_a, 20);
    }

    #[tokio::test]
    async fn test_claimed_directory_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let registry = FileModelRegistry::new(dir.path());
        let run = registry.create_run("exp").await.unwrap();

        // Another process reserved 1 and 2 but has not written metadata yet
        let model_dir = dir.path().join("models").join(name().as_str());
        std::fs::create_dir_all(model_dir.join("1")).unwrap();
        std::fs::create_dir_all(model_dir.join("2")).unwrap();

        let version = registry
            .register_model_version(&name(), run.run_id(), &artifact())
            .await
            .unwrap();
        assert_eq!(version.version(), 3);
        assert!(!model_dir.join("1").join("model.json").exists());
    }
}
