//! Inference seam between the HTTP layer and the loaded estimator

use std::fmt::Debug;

use super::{FeatureFrame, PredictionError};
use crate::domain::classifier::LogisticRegression;

/// Integer class label (0 = setosa, 1 = versicolor, 2 = virginica)
pub type Label = usize;

/// Anything that can label a feature frame, one label per row
pub trait Predictor: Send + Sync + Debug {
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<Label>, PredictionError>;
}

impl Predictor for LogisticRegression {
    fn predict(&self, frame: &FeatureFrame) -> Result<Vec<Label>, PredictionError> {
        LogisticRegression::predict(self, frame.values())
            .map(|labels| labels.to_vec())
            .map_err(|e| PredictionError::inference(e.to_string()))
    }
}
