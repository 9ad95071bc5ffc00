//! Training service - fit, score, track and register the iris classifier

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::TrainingJobConfig;
use crate::domain::dataset::{iris, train_test_split};
use crate::domain::registry::ModelArtifact;
use crate::domain::{
    accuracy_score, DomainError, LogisticRegression, ModelName, ModelRegistry, ModelVersion,
    RunStatus, TrackingRun,
};

/// Fitted estimator and its held-out score, before anything is logged
#[derive(Debug, Clone)]
pub struct FitOutcome {
    pub model: LogisticRegression,
    pub feature_names: Vec<String>,
    pub accuracy: f64,
}

/// Summary of one completed training run
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub run_id: String,
    pub model_name: ModelName,
    pub version: u32,
    pub accuracy: f64,
}

/// Runs the training job against a registry
#[derive(Debug)]
pub struct TrainingService {
    registry: Arc<dyn ModelRegistry>,
    config: TrainingJobConfig,
}

impl TrainingService {
    pub fn new(registry: Arc<dyn ModelRegistry>, config: TrainingJobConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &TrainingJobConfig {
        &self.config
    }

    /// Load, split, fit and score. Pure: touches no registry.
    pub fn fit_and_score(&self) -> Result<FitOutcome, DomainError> {
        let dataset = iris::load();
        let split = train_test_split(&dataset, self.config.test_size, self.config.random_state)?;

        info!(
            train_samples = split.train.n_samples(),
            test_samples = split.test.n_samples(),
            "Split dataset"
        );

        let mut model = LogisticRegression::new();
        model.fit(split.train.features(), split.train.targets())?;

        let predictions = model.predict(split.test.features())?;
        let accuracy = accuracy_score(split.test.targets(), &predictions)?;

        Ok(FitOutcome {
            model,
            feature_names: dataset.feature_names().to_vec(),
            accuracy,
        })
    }

    /// Run the full job: one new run and one new model version per call.
    ///
    /// Never changes which version holds a stage.
    pub async fn run(&self) -> Result<TrainingReport, DomainError> {
        let model_name = ModelName::new(self.config.model_name.clone())?;

        info!(
            project = %self.config.project_id,
            experiment = %self.config.experiment_name,
            model = %model_name,
            "Starting training job"
        );

        let outcome = self.fit_and_score()?;
        let run = self.registry.create_run(&self.config.experiment_name).await?;

        let version = match self.log_and_register(&run, &model_name, &outcome).await {
            Ok(version) => version,
            Err(e) => {
                if let Err(finish_err) = self
                    .registry
                    .finish_run(run.run_id(), RunStatus::Failed)
                    .await
                {
                    warn!(run_id = %run.run_id(), error = %finish_err, "Could not mark run as failed");
                }
                return Err(e);
            }
        };

        self.registry
            .finish_run(run.run_id(), RunStatus::Finished)
            .await?;

        info!(run_id = %run.run_id(), "Model logged with run_id: {}", run.run_id());
        info!(accuracy = outcome.accuracy, "Accuracy: {}", outcome.accuracy);

        Ok(TrainingReport {
            run_id: run.run_id().to_string(),
            model_name,
            version: version.version(),
            accuracy: outcome.accuracy,
        })
    }

    async fn log_and_register(
        &self,
        run: &TrackingRun,
        model_name: &ModelName,
        outcome: &FitOutcome,
    ) -> Result<ModelVersion, DomainError> {
        let run_id = run.run_id();

        for (key, value) in self.params(&outcome.model) {
            self.registry.log_param(run_id, key, &value).await?;
        }
        self.registry
            .log_metric(run_id, "accuracy", outcome.accuracy)
            .await?;

        let artifact =
            ModelArtifact::logistic_regression(outcome.feature_names.clone(), outcome.model.clone());
        let version = self
            .registry
            .register_model_version(model_name, run_id, &artifact)
            .await?;

        info!(model = %model_name, version = version.version(), "Registered model version");
        Ok(version)
    }

    fn params(&self, model: &LogisticRegression) -> Vec<(&'static str, String)> {
        let params = model.params();
        vec![
            ("model_type", "LogisticRegression".to_string()),
            ("solver", params.solver.to_string()),
            ("multi_class", params.multi_class.to_string()),
            ("C", params.c.to_string()),
            ("max_iter", params.max_iter.to_string()),
            ("test_size", self.config.test_size.to_string()),
            ("random_state", self.config.random_state.to_string()),
        ]
    }
}
