//! Registry validation utilities

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for registered model names
pub const MAX_MODEL_NAME_LENGTH: usize = 100;

/// Names double as directory names in the file store, so no separators
static MODEL_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").unwrap());

/// Registry validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryValidationError {
    /// Model name is empty
    EmptyName,
    /// Model name exceeds maximum length
    NameTooLong { length: usize, max: usize },
    /// Model name contains invalid characters
    InvalidNameFormat { name: String },
    /// Stage string is not a known stage
    UnknownStage { stage: String },
    /// Model URI does not follow `models:/<name>/<stage-or-version>`
    InvalidUri { uri: String },
}

impl fmt::Display for RegistryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Model name cannot be empty"),
            Self::NameTooLong { length, max } => {
                write!(f, "Model name too long: {} characters (max {})", length, max)
            }
            Self::InvalidNameFormat { name } => write!(
                f,
                "Invalid model name '{}': must start with a letter or digit and contain only letters, digits, '_', '-' or '.'",
                name
            ),
            Self::UnknownStage { stage } => write!(
                f,
                "Unknown stage '{}': expected one of None, Staging, Production, Archived",
                stage
            ),
            Self::InvalidUri { uri } => write!(
                f,
                "Invalid model URI '{}': expected models:/<name>/<stage-or-version>",
                uri
            ),
        }
    }
}

impl std::error::Error for RegistryValidationError {}

/// Validate a registered model name
pub fn validate_model_name(name: &str) -> Result<(), RegistryValidationError> {
    if name.is_empty() {
        return Err(RegistryValidationError::EmptyName);
    }

    if name.len() > MAX_MODEL_NAME_LENGTH {
        return Err(RegistryValidationError::NameTooLong {
            length: name.len(),
            max: MAX_MODEL_NAME_LENGTH,
        });
    }

    if !MODEL_NAME_PATTERN.is_match(name) {
        return Err(RegistryValidationError::InvalidNameFormat {
            name: name.to_string(),
        });
    }

    Ok(())
}
