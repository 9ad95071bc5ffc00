//! One-vs-rest logistic regression

use std::fmt;

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use super::{accuracy_score, ModelError};

/// Strategy for extending the binary model to several classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiClass {
    /// One binary classifier per class, highest decision score wins
    OneVsRest,
}

impl fmt::Display for MultiClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneVsRest => write!(f, "ovr"),
        }
    }
}

/// Optimisation routine used by `fit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solver {
    /// Full-batch gradient descent on standardized features
    GradientDescent,
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GradientDescent => write!(f, "gradient_descent"),
        }
    }
}

/// Hyperparameters, fixed before fitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegressionParams {
    /// Inverse of L2 regularization strength
    pub c: f64,
    /// Maximum gradient steps per binary classifier
    pub max_iter: usize,
    /// Gradient-norm convergence tolerance
    pub tol: f64,
    /// Step size
    pub learning_rate: f64,
    pub multi_class: MultiClass,
    pub solver: Solver,
}

impl Default for LogisticRegressionParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 3000,
            tol: 1e-6,
            learning_rate: 1.0,
            multi_class: MultiClass::OneVsRest,
            solver: Solver::GradientDescent,
        }
    }
}

/// Learned state. Coefficients live in standardized feature space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FittedState {
    classes: Vec<usize>,
    coefficients: Array2<f64>,
    intercepts: Array1<f64>,
    feature_means: Array1<f64>,
    feature_scales: Array1<f64>,
    iterations: Vec<usize>,
}

/// L2-regularized logistic regression classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    params: LogisticRegressionParams,
    fitted: Option<FittedState>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
    /// Create an unfitted model with default hyperparameters
    pub fn new() -> Self {
        Self::with_params(LogisticRegressionParams::default())
    }

    pub fn with_params(params: LogisticRegressionParams) -> Self {
        Self {
            params,
            fitted: None,
        }
    }

    /// Set inverse regularization strength
    pub fn with_c(mut self, c: f64) -> Self {
        self.params.c = c;
        self
    }

    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.params.max_iter = max_iter;
        self
    }

    pub fn params(&self) -> &LogisticRegressionParams {
        &self.params
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Class labels seen during fitting, ascending
    pub fn classes(&self) -> Option<&[usize]> {
        self.fitted.as_ref().map(|f| f.classes.as_slice())
    }

    /// Gradient steps taken by each binary classifier
    pub fn iterations(&self) -> Option<&[usize]> {
        self.fitted.as_ref().map(|f| f.iterations.as_slice())
    }

    pub fn n_features(&self) -> Option<usize> {
        self.fitted.as_ref().map(|f| f.feature_means.len())
    }

    fn sigmoid(z: &Array1<f64>) -> Array1<f64> {
        z.mapv(|v| 1.0 / (1.0 + (-v).exp()))
    }

    fn validate_params(&self) -> Result<(), ModelError> {
        let p = &self.params;

        if !(p.c > 0.0) || !p.c.is_finite() {
            return Err(ModelError::InvalidInput(format!("C must be positive, got {}", p.c)));
        }

        if !(p.learning_rate > 0.0) {
            return Err(ModelError::InvalidInput(format!(
                "learning_rate must be positive, got {}",
                p.learning_rate
            )));
        }

        if p.max_iter == 0 {
            return Err(ModelError::InvalidInput("max_iter must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Fit one binary classifier per class
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<usize>) -> Result<&mut Self, ModelError> {
        self.validate_params()?;

        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.len() {
            return Err(ModelError::shape(
                format!("y length = {}", n_samples),
                format!("y length = {}", y.len()),
            ));
        }

        if n_samples == 0 || n_features == 0 {
            return Err(ModelError::InvalidInput(
                "cannot fit on an empty feature matrix".to_string(),
            ));
        }

        if x.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::InvalidInput(
                "features must be finite numbers".to_string(),
            ));
        }

        let mut classes: Vec<usize> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        if classes.len() < 2 {
            return Err(ModelError::InvalidInput(format!(
                "need samples of at least 2 classes, got {}",
                classes.len()
            )));
        }

        let feature_means = x
            .mean_axis(Axis(0))
            .ok_or_else(|| ModelError::InvalidInput("empty feature matrix".to_string()))?;
        let feature_scales = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > f64::EPSILON { s } else { 1.0 });
        let z = (x - &feature_means) / &feature_scales;

        let mut coefficients = Array2::zeros((classes.len(), n_features));
        let mut intercepts = Array1::zeros(classes.len());
        let mut iterations = Vec::with_capacity(classes.len());

        for (k, &class) in classes.iter().enumerate() {
            let target = y.mapv(|label| if label == class { 1.0 } else { 0.0 });
            let (weights, bias, steps) = self.fit_binary(&z, &target);

            coefficients.row_mut(k).assign(&weights);
            intercepts[k] = bias;
            iterations.push(steps);
        }

        self.fitted = Some(FittedState {
            classes,
            coefficients,
            intercepts,
            feature_means,
            feature_scales,
            iterations,
        });

        Ok(self)
    }

    /// Gradient descent on mean log-loss plus `||w||^2 / (2 C n)`. The intercept is unpenalized.
    fn fit_binary(&self, z: &Array2<f64>, target: &Array1<f64>) -> (Array1<f64>, f64, usize) {
        let n_samples = z.nrows() as f64;
        let penalty = 1.0 / (self.params.c * n_samples);
        let lr = self.params.learning_rate;

        let mut weights: Array1<f64> = Array1::zeros(z.ncols());
        let mut bias = 0.0;
        let mut steps = self.params.max_iter;

        for iter in 0..self.params.max_iter {
            let linear = z.dot(&weights) + bias;
            let errors = Self::sigmoid(&linear) - target;

            let dw = z.t().dot(&errors) / n_samples + &weights * penalty;
            let db = errors.sum() / n_samples;

            let grad_norm = (dw.mapv(|v| v * v).sum() + db * db).sqrt();
            if grad_norm < self.params.tol {
                steps = iter;
                break;
            }

            weights.scaled_add(-lr, &dw);
            bias -= lr * db;
        }

        (weights, bias, steps)
    }

    fn fitted_state(&self, x: &Array2<f64>) -> Result<&FittedState, ModelError> {
        let fitted = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        let expected = fitted.feature_means.len();

        if x.ncols() != expected {
            return Err(ModelError::shape(
                format!("{} features", expected),
                format!("{} features", x.ncols()),
            ));
        }

        Ok(fitted)
    }

    /// Per-class decision scores, shape `(n_samples, n_classes)`
    pub fn decision_function(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        let fitted = self.fitted_state(x)?;
        let z = (x - &fitted.feature_means) / &fitted.feature_scales;

        Ok(z.dot(&fitted.coefficients.t()) + &fitted.intercepts)
    }

    /// Per-class probabilities, each row normalized to sum to one
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        let mut proba = self.decision_function(x)?.mapv(|v| 1.0 / (1.0 + (-v).exp()));

        for mut row in proba.rows_mut() {
            let total = row.sum();
            if total > 0.0 {
                row /= total;
            }
        }

        Ok(proba)
    }

    /// Predict class labels
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>, ModelError> {
        let scores = self.decision_function(x)?;
        let classes = &self.fitted_state(x)?.classes;

        let labels = scores
            .rows()
            .into_iter()
            .map(|row| {
                let mut best = 0;
                for (k, &score) in row.iter().enumerate() {
                    if score > row[best] {
                        best = k;
                    }
                }
                classes[best]
            })
            .collect();

        Ok(labels)
    }

    /// Accuracy on the given samples
    pub fn score(&self, x: &Array2<f64>, y: &Array1<usize>) -> Result<f64, ModelError> {
        let y_pred = self.predict(x)?;
        accuracy_score(y, &y_pred)
    }
}
