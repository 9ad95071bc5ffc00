//! Prediction service - the model held by a serving process

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::dataset::iris::FEATURE_NAMES;
use crate::domain::{
    DomainError, FeatureFrame, Label, ModelRegistry, ModelUri, ModelVersion, PredictionError,
    Predictor,
};

/// A loaded model version, shared read-only by every request
#[derive(Debug, Clone)]
pub struct PredictionService {
    version: ModelVersion,
    predictor: Arc<dyn Predictor>,
}

impl PredictionService {
    pub fn new(version: ModelVersion, predictor: Arc<dyn Predictor>) -> Self {
        Self { version, predictor }
    }

    /// Resolve `uri` against the registry and load the artifact it points to
    pub async fn load(registry: &dyn ModelRegistry, uri: &ModelUri) -> Result<Self, DomainError> {
        info!(uri = %uri, "Loading model");

        let (version, artifact) = registry.load_model(uri).await?;
        artifact.ensure_servable(&FEATURE_NAMES)?;

        info!(
            model = %version.name(),
            version = version.version(),
            stage = %version.stage(),
            run_id = %version.run_id(),
            "Model loaded"
        );

        Ok(Self::new(version, Arc::new(artifact.into_estimator())))
    }

    pub fn version(&self) -> &ModelVersion {
        &self.version
    }

    /// Label every row, in input order
    pub fn predict<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Vec<Label>, PredictionError> {
        let frame = FeatureFrame::from_rows(rows)?;
        if frame.is_empty() {
            return Ok(Vec::new());
        }

        let labels = self.predictor.predict(&frame)?;
        if labels.len() != frame.n_rows() {
            return Err(PredictionError::inference(format!(
                "Model returned {} labels for {} rows",
                labels.len(),
                frame.n_rows()
            )));
        }

        debug!(rows = frame.n_rows(), "Prediction complete");
        Ok(labels)
    }
}
