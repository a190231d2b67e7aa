//! In-memory data for fitting and evaluating regressors.
//!
//! - [`DataSplit`]: one side of a train/test pair: raw feature sequences
//!   (one `Vec<f64>` per feature dimension) plus aligned targets.
//! - [`batch`]: uniform random mini-batch selection for gradient descent.
//!
//! # Example
//!
//! ```rust
//! use polyreg::dataset::DataSplit;
//!
//! // Two features observed three times.
//! let inputs = vec![vec![1.0, 2.0, 3.0], vec![0.5, 0.0, -0.5]];
//! let targets = vec![1.0, 2.0, 3.0];
//! let split = DataSplit::new(inputs, targets).unwrap();
//!
//! assert_eq!(split.n_samples(), 3);
//! assert_eq!(split.n_features(), 2);
//! ```

pub mod batch;

use crate::error::{RegressionError, Result};
use ndarray::Array1;

/// Feature sequences and targets for one fit or evaluation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct DataSplit {
    inputs: Vec<Vec<f64>>,
    targets: Array1<f64>,
}

impl DataSplit {
    /// Creates a split after checking that every feature sequence is as long
    /// as the target vector.
    ///
    /// # Errors
    /// - [`RegressionError::EmptyData`] if there are no feature sequences.
    /// - [`RegressionError::ShapeMismatch`] on any length disagreement.
    pub fn new(inputs: Vec<Vec<f64>>, targets: impl Into<Array1<f64>>) -> Result<Self> {
        let targets = targets.into();

        if inputs.is_empty() {
            return Err(RegressionError::EmptyData(
                "a data split needs at least one feature".to_string(),
            ));
        }

        for (idx, feature) in inputs.iter().enumerate() {
            if feature.len() != targets.len() {
                return Err(RegressionError::shape(
                    format!("{} observations (targets)", targets.len()),
                    format!("{} observations in feature {idx}", feature.len()),
                ));
            }
        }

        Ok(Self { inputs, targets })
    }

    /// Feature sequences, one per feature dimension.
    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    pub fn targets(&self) -> &Array1<f64> {
        &self.targets
    }

    pub fn n_samples(&self) -> usize {
        self.targets.len()
    }

    pub fn n_features(&self) -> usize {
        self.inputs.len()
    }

    /// Mean of the targets, or `None` for an empty split.
    pub fn target_mean(&self) -> Option<f64> {
        self.targets.mean()
    }
}
