//! Domain layer - Core business logic and entities

pub mod classifier;
pub mod dataset;
pub mod error;
pub mod prediction;
pub mod registry;
pub mod tracking;

pub use classifier::{accuracy_score, LogisticRegression, LogisticRegressionParams, ModelError};
pub use dataset::{train_test_split, Dataset, TrainTestSplit};
pub use error::DomainError;
pub use prediction::{FeatureFrame, Label, PredictionError, Predictor, FEATURE_COUNT};
pub use registry::{
    ModelArtifact, ModelName, ModelRegistry, ModelUri, ModelVersion, RegistryValidationError,
    Stage, VersionSelector,
};
pub use tracking::{RunStatus, TrackingRun};

