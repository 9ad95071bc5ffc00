//! Prediction domain - feature rows in, class labels out

mod error;
mod features;
mod predictor;

pub use error::PredictionError;
pub use features::{FeatureFrame, FEATURE_COUNT};
pub use predictor::{Label, Predictor};
