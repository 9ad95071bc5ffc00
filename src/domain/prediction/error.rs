use thiserror::Error;

/// Why a single prediction request failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// Rows are missing, of the wrong length, or hold non-numeric values
    #[error("{0}")]
    InputShape(String),

    /// No model is held by this process
    #[error("Model not loaded")]
    ModelUnavailable,

    /// The loaded model rejected a well-formed frame
    #[error("{0}")]
    Inference(String),
}

impl PredictionError {
    pub fn input_shape(message: impl Into<String>) -> Self {
        Self::InputShape(message.into())
    }

    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference(message.into())
    }

    /// Stable identifier used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputShape(_) => "input_shape_error",
            Self::ModelUnavailable => "model_unavailable",
            Self::Inference(_) => "inference_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(PredictionError::ModelUnavailable.to_string(), "Model not loaded");
        assert_eq!(
            PredictionError::input_shape("Row 0 has 3 values, expected 4").to_string(),
            "Row 0 has 3 values, expected 4"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(PredictionError::input_shape("x").kind(), "input_shape_error");
        assert_eq!(PredictionError::ModelUnavailable.kind(), "model_unavailable");
        assert_eq!(PredictionError::inference("x").kind(), "inference_error");
    }
}
