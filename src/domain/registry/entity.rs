//! Registered model entities

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_model_name, RegistryValidationError};

/// Registered model name - letters, digits, `_`, `-`, `.`; max 100 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModelName(String);

impl ModelName {
    /// Create a new ModelName after validation
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryValidationError> {
        let name = name.into();
        validate_model_name(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ModelName {
    type Error = RegistryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModelName> for String {
    fn from(name: ModelName) -> Self {
        name.0
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deployment stage label attached to a model version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    None,
    Staging,
    Production,
    Archived,
}

impl Stage {
    /// Stages that at most one version per model may hold at a time
    pub fn is_exclusive(&self) -> bool {
        matches!(self, Self::Staging | Self::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Staging => "Staging",
            Self::Production => "Production",
            Self::Archived => "Archived",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stage {
    type Err = RegistryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            "archived" => Ok(Self::Archived),
            _ => Err(RegistryValidationError::UnknownStage {
                stage: s.to_string(),
            }),
        }
    }
}

/// One immutable version of a registered model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelVersion {
    name: ModelName,
    version: u32,
    run_id: String,
    stage: Stage,
    created_at: DateTime<Utc>,
    last_updated_at: DateTime<Utc>,
}

impl ModelVersion {
    pub fn new(name: ModelName, version: u32, run_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name,
            version,
            run_id: run_id.into(),
            stage: Stage::None,
            created_at: now,
            last_updated_at: now,
        }
    }

    pub fn name(&self) -> &ModelName {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_updated_at(&self) -> DateTime<Utc> {
        self.last_updated_at
    }

    /// Move this version to another stage
    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
        self.last_updated_at = Utc::now();
    }
}

/// Which version of a registered model a URI points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSelector {
    /// Latest version currently holding the stage
    Stage(Stage),
    /// An exact version number
    Version(u32),
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stage(stage) => write!(f, "{}", stage),
            Self::Version(version) => write!(f, "{}", version),
        }
    }
}

/// Registry model reference of the form `models:/<name>/<stage-or-version>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelUri {
    pub name: ModelName,
    pub selector: VersionSelector,
}

impl ModelUri {
    const SCHEME: &'static str = "models:/";

    pub fn for_stage(name: ModelName, stage: Stage) -> Self {
        Self {
            name,
            selector: VersionSelector::Stage(stage),
        }
    }

    pub fn for_version(name: ModelName, version: u32) -> Self {
        Self {
            name,
            selector: VersionSelector::Version(version),
        }
    }
}

impl fmt::Display for ModelUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}", Self::SCHEME, self.name, self.selector)
    }
}

impl FromStr for ModelUri {
    type Err = RegistryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RegistryValidationError::InvalidUri { uri: s.to_string() };

        let rest = s.strip_prefix(Self::SCHEME).ok_or_else(invalid)?;
        let (name, selector) = rest.split_once('/').ok_or_else(invalid)?;

        if selector.is_empty() || selector.contains('/') {
            return Err(invalid());
        }

        let name = ModelName::new(name)?;
        let selector = match selector.parse::<u32>() {
            Ok(version) if version > 0 => VersionSelector::Version(version),
            Ok(_) => return Err(invalid()),
            Err(_) => VersionSelector::Stage(selector.parse()?),
        };

        Ok(Self { name, selector })
    }
}
