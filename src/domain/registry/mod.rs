//! Registry domain - registered models, their versions and stages

mod artifact;
mod entity;
mod repository;
mod transition;
mod validation;

pub use artifact::{ModelArtifact, LOGISTIC_REGRESSION_FLAVOR};
pub use entity::{ModelName, ModelUri, ModelVersion, Stage, VersionSelector};
pub use repository::ModelRegistry;
pub use transition::{apply_stage_transition, StageTransition};
pub use validation::{validate_model_name, RegistryValidationError, MAX_MODEL_NAME_LENGTH};
