//! Application services for the training job and the prediction server

mod prediction_service;
mod training_service;

pub use prediction_service::PredictionService;
pub use training_service::{FitOutcome, TrainingReport, TrainingService};
