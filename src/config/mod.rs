//! Configuration for the serving process and the training job

mod app_config;
mod training_config;

pub use app_config::{
    AppConfig, LogFormat, LoggingConfig, RegistryConfig, ServerConfig, ServingConfig,
    MODEL_NAME_ENV, MODEL_STAGE_ENV, TRACKING_URI_ENV,
};
pub use training_config::TrainingJobConfig;
