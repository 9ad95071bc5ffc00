//! Classifier domain - the estimator the training job fits and the server applies

mod error;
mod logistic;
mod metrics;

pub use error::ModelError;
pub use logistic::{LogisticRegression, LogisticRegressionParams, MultiClass, Solver};
pub use metrics::accuracy_score;
