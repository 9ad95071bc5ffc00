//! Request and response bodies for `POST /predict`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Label, PredictionError, FEATURE_COUNT};

/// `{"data": [[sepal_length, sepal_width, petal_length, petal_width], ...]}`
///
/// Cells are kept as raw JSON so a non-numeric value can be reported with its
/// position instead of as a generic decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub data: Vec<Vec<Value>>,
}

impl PredictRequest {
    /// Convert every cell to `f64`, rejecting anything that is not a JSON number
    pub fn into_rows(self) -> Result<Vec<[f64; FEATURE_COUNT]>, PredictionError> {
        self.data
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                if row.len() != FEATURE_COUNT {
                    return Err(PredictionError::input_shape(format!(
                        "Row {} has {} values, expected {}",
                        i,
                        row.len(),
                        FEATURE_COUNT
                    )));
                }

                let mut values = [0.0; FEATURE_COUNT];
                for (j, cell) in row.iter().enumerate() {
                    values[j] = cell.as_f64().ok_or_else(|| {
                        PredictionError::input_shape(format!(
                            "Row {}, column {} is not a number: {}",
                            i, j, cell
                        ))
                    })?;
                }
                Ok(values)
            })
            .collect()
    }
}

/// `{"predictions": [label, ...]}`, one label per input row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predictions: Vec<Label>,
}
