//! Fixed-order feature frame handed to the model

use ndarray::Array2;

use super::PredictionError;
use crate::domain::dataset::iris::FEATURE_NAMES;

/// Number of measurements in every feature row
pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

/// Rows of the four iris measurements, labelled with the training column order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    values: Array2<f64>,
}

impl FeatureFrame {
    /// Build a frame, checking every row has exactly one value per column
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, PredictionError> {
        let mut values = Array2::zeros((rows.len(), FEATURE_COUNT));

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();

            if row.len() != FEATURE_COUNT {
                return Err(PredictionError::input_shape(format!(
                    "Row {} has {} values, expected {} ({})",
                    i,
                    row.len(),
                    FEATURE_COUNT,
                    FEATURE_NAMES.join(", ")
                )));
            }

            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(PredictionError::input_shape(format!(
                    "Row {}, column '{}' is not a finite number",
                    i, FEATURE_NAMES[j]
                )));
            }

            for (j, &value) in row.iter().enumerate() {
                values[[i, j]] = value;
            }
        }

        Ok(Self { values })
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &FEATURE_NAMES
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }
}
