use serde::Deserialize;

/// Environment variable naming the registered model to serve
pub const MODEL_NAME_ENV: &str = "MODEL_NAME";
/// Environment variable naming the registry stage to serve
pub const MODEL_STAGE_ENV: &str = "MODEL_STAGE";
/// Environment variable overriding the tracking/registry location
pub const TRACKING_URI_ENV: &str = "MLFLOW_TRACKING_URI";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub serving: ServingConfig,
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Which registered model the server loads at startup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServingConfig {
    pub model_name: String,
    pub model_stage: String,
}

/// Where the tracking/registry store lives
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// `None` falls back to the local `./mlruns` directory
    pub tracking_uri: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ServingConfig {
    fn default() -> Self {
        Self {
            model_name: "IrisLogisticRegressionModel".to_string(),
            model_stage: "Production".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from config files, `APP__*` variables and the serving variables of the process
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_env(|key| std::env::var(key).ok())
    }

    /// Load with a custom lookup for `MODEL_NAME`, `MODEL_STAGE` and `MLFLOW_TRACKING_URI`
    pub fn load_with_env<F>(lookup: F) -> Result<Self, config::ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("serving.model_name", non_empty(MODEL_NAME_ENV))?
            .set_override_option("serving.model_stage", non_empty(MODEL_STAGE_ENV))?
            .set_override_option("registry.tracking_uri", non_empty(TRACKING_URI_ENV))?
            .build()?;

        config.try_deserialize()
    }
}
