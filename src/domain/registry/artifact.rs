//! Serialized estimator stored with each model version

use serde::{Deserialize, Serialize};

use crate::domain::classifier::LogisticRegression;
use crate::domain::DomainError;

/// Flavor tag written for logistic regression artifacts
pub const LOGISTIC_REGRESSION_FLAVOR: &str = "logistic_regression";

/// The estimator plus the feature order it was trained with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    flavor: String,
    feature_names: Vec<String>,
    estimator: LogisticRegression,
}

impl ModelArtifact {
    pub fn logistic_regression(feature_names: Vec<String>, estimator: LogisticRegression) -> Self {
        Self {
            flavor: LOGISTIC_REGRESSION_FLAVOR.to_string(),
            feature_names,
            estimator,
        }
    }

    pub fn flavor(&self) -> &str {
        &self.flavor
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn estimator(&self) -> &LogisticRegression {
        &self.estimator
    }

    pub fn into_estimator(self) -> LogisticRegression {
        self.estimator
    }

    /// Reject artifacts that cannot be served with the given column order
    pub fn ensure_servable(&self, expected_features: &[&str]) -> Result<(), DomainError> {
        if self.flavor != LOGISTIC_REGRESSION_FLAVOR {
            return Err(DomainError::validation(format!(
                "Unsupported model flavor '{}'",
                self.flavor
            )));
        }

        if !self.estimator.is_fitted() {
            return Err(DomainError::validation("Model artifact holds an unfitted estimator"));
        }

        if self.feature_names.iter().map(String::as_str).ne(expected_features.iter().copied()) {
            return Err(DomainError::validation(format!(
                "Model was trained on features {:?}, expected {:?}",
                self.feature_names, expected_features
            )));
        }

        Ok(())
    }
}
