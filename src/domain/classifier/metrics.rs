//! Classification metrics

use ndarray::Array1;

use super::ModelError;

/// Fraction of predictions that exactly match the true labels
pub fn accuracy_score(y_true: &Array1<usize>, y_pred: &Array1<usize>) -> Result<f64, ModelError> {
    if y_true.len() != y_pred.len() {
        return Err(ModelError::shape(
            format!("y_pred length = {}", y_true.len()),
            format!("y_pred length = {}", y_pred.len()),
        ));
    }

    if y_true.is_empty() {
        return Err(ModelError::InvalidInput(
            "accuracy is undefined for zero samples".to_string(),
        ));
    }

    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(actual, predicted)| actual == predicted)
        .count();

    Ok(correct as f64 / y_true.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_perfect_accuracy() {
        let y = array![0, 1, 2, 1];
        assert_eq!(accuracy_score(&y, &y).unwrap(), 1.0);
    }

    #[test]
    fn test_partial_accuracy() {
        let y_true = array![0, 1, 2, 1];
        let y_pred = array![0, 2, 2, 0];
        assert_eq!(accuracy_score(&y_true, &y_pred).unwrap(), 0.5);
    }

    #[test]
    fn test_length_mismatch() {
        let err = accuracy_score(&array![0, 1], &array![0]).unwrap_err();
        assert!(matches!(err, ModelError::Shape { .. }));
    }

    #[test]
    fn test_empty_input() {
        let empty: Array1<usize> = Array1::zeros(0);
        assert!(accuracy_score(&empty, &empty).is_err());
    }
}
