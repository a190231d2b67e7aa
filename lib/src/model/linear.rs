//! Linear predictor `y = X @ beta + intercept`.
//!
//! `beta` comes from any estimator in the crate. `intercept` is a constant
//! offset added to every prediction; it is zero when the design matrix carries
//! its own column of ones, and the training-target mean when the features were
//! centered before fitting.

use crate::error::{RegressionError, Result};
use crate::model::InferenceModel;
use ndarray::{Array1, Array2};

/// A fitted linear model.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearModel {
    beta: Array1<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Wraps fitted coefficients with no constant offset.
    pub fn new(beta: Array1<f64>) -> Self {
        Self {
            beta,
            intercept: 0.0,
        }
    }

    pub fn with_intercept(mut self, intercept: f64) -> Self {
        self.intercept = intercept;
        self
    }

    /// Fitted coefficients, one per design-matrix column.
    pub fn coefficients(&self) -> &Array1<f64> {
        &self.beta
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn n_features(&self) -> usize {
        self.beta.len()
    }

    fn check_features(&self, got: usize) -> Result<()> {
        if got != self.n_features() {
            return Err(RegressionError::FeatureMismatch {
                expected_features: self.n_features(),
                got_features: got,
            });
        }
        Ok(())
    }
}

impl InferenceModel for LinearModel {
    type InputSingle = [f64];
    type InputBatch = Array2<f64>;
    type OutputSingle = f64;
    type OutputBatch = Array1<f64>;

    fn predict(&self, input: &[f64]) -> Result<f64> {
        self.check_features(input.len())?;
        let dot: f64 = self.beta.iter().zip(input).map(|(b, x)| b * x).sum();
        Ok(dot + self.intercept)
    }

    fn predict_batch(&self, input: &Array2<f64>) -> Result<Array1<f64>> {
        self.check_features(input.ncols())?;
        Ok(input.dot(&self.beta) + self.intercept)
    }
}
