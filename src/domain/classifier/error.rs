use thiserror::Error;

/// Errors raised while fitting or applying a classifier
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Model has not been fitted")]
    NotFitted,

    #[error("Invalid shape: expected {expected}, got {actual}")]
    Shape { expected: String, actual: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ModelError {
    pub fn shape(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::Shape {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
