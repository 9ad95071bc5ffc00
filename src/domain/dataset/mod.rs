//! Dataset domain - tabular training data and reproducible partitioning

pub mod iris;
mod split;

use ndarray::{Array1, Array2, Axis};

pub use split::{train_test_split, TrainTestSplit};

/// Labelled tabular dataset: one row per sample, one column per feature
#[derive(Debug, Clone)]
pub struct Dataset {
    feature_names: Vec<String>,
    target_names: Vec<String>,
    features: Array2<f64>,
    targets: Array1<usize>,
}

impl Dataset {
    pub fn new(
        feature_names: Vec<String>,
        target_names: Vec<String>,
        features: Array2<f64>,
        targets: Array1<usize>,
    ) -> Self {
        Self {
            feature_names,
            target_names,
            features,
            targets,
        }
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn target_names(&self) -> &[String] {
        &self.target_names
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn targets(&self) -> &Array1<usize> {
        &self.targets
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Build a new dataset from the given row indices, in that order
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            feature_names: self.feature_names.clone(),
            target_names: self.target_names.clone(),
            features: self.features.select(Axis(0), indices),
            targets: self.targets.select(Axis(0), indices),
        }
    }
}
