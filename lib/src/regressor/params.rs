use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Hyperparameters shared by every regressor kind.
///
/// Each kind reads only the fields it needs (see
/// [`RegressorKind::resolve`](crate::regressor::RegressorKind::resolve)); the
/// rest are ignored. Missing JSON fields take their defaults.
///
/// # Example
/// ```
/// use polyreg::regressor::RegressorParams;
///
/// let params = RegressorParams::from_json(r#"{ "fit_intercept": true, "alpha": 0.5 }"#).unwrap();
/// assert!(params.fit_intercept);
/// assert_eq!(params.alpha, 0.5);
/// assert_eq!(params.batch_size, 32);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressorParams {
    /// Center the polynomial features on the training data and use the
    /// training-target mean as intercept instead of a column of ones.
    pub fit_intercept: bool,
    pub learning_rate: f64,
    pub max_iterations: usize,
    /// Momentum coefficient in `[0, 1)`.
    pub momentum: f64,
    pub batch_size: usize,
    /// Penalty strength for ridge, lasso and logistic.
    pub alpha: f64,
}

impl Default for RegressorParams {
    fn default() -> Self {
        Self {
            fit_intercept: false,
            learning_rate: 0.01,
            max_iterations: 1000,
            momentum: 0.0,
            batch_size: 32,
            alpha: 0.0,
        }
    }
}

impl RegressorParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object; absent fields keep their defaults.
    ///
    /// # Errors
    /// [`RegressionError::Config`](crate::RegressionError::Config) on malformed
    /// JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }
}
