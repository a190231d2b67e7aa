//! Mean/range centering scaler.
//!
//! Centers each column on its training mean and divides by its training range:
//! ```text
//! X_scaled = (X - mean(X_train)) / (max(X_train) - min(X_train))
//! ```
//!
//! The learned `(mean, range)` pair is kept by [`FittedCenterScaler`] so the
//! identical affine transform can be replayed on test data. A column whose
//! training range is zero yields non-finite values; callers must keep constant
//! columns (such as an intercept column of ones) away from this scaler.
//!
//! # Example
//! ```
//! use ndarray::array;
//! use polyreg::preprocessing::{CenterScaler, FittedTransformer, Transformer};
//!
//! let train = array![[1.0, 10.0], [3.0, 30.0]];
//! let (scaler, scaled) = CenterScaler::new().fit_transform(&train).unwrap();
//! assert_eq!(scaled, array![[-0.5, -0.5], [0.5, 0.5]]);
//!
//! let test = array![[2.0, 20.0]];
//! assert_eq!(scaler.transform(&test).unwrap(), array![[0.0, 0.0]]);
//! ```

use crate::error::{RegressionError, Result};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{Array1, Array2, Axis};

/// CenterScaler transformer (unfitted).
#[derive(Clone, Debug, Default)]
pub struct CenterScaler;

impl CenterScaler {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for CenterScaler {
    type Fitted = FittedCenterScaler;

    fn fit(&self, data: &Array2<f64>) -> Result<Self::Fitted> {
        let (rows, cols) = data.dim();

        if rows == 0 {
            return Err(RegressionError::EmptyData(
                "Cannot fit CenterScaler on empty data".to_string(),
            ));
        }

        let mean = data
            .mean_axis(Axis(0))
            .ok_or_else(|| RegressionError::EmptyData("no rows to average".to_string()))?;
        let max = data.fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &x| acc.max(x));
        let min = data.fold_axis(Axis(0), f64::INFINITY, |&acc, &x| acc.min(x));

        Ok(FittedCenterScaler {
            mean,
            range: max - min,
            n_features: cols,
        })
    }
}

/// Fitted CenterScaler holding the training mean and range of each column.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedCenterScaler {
    mean: Array1<f64>,
    range: Array1<f64>,
    n_features: usize,
}

impl FittedCenterScaler {
    /// Rebuilds a scaler from a previously captured `(mean, range)` pair.
    pub fn from_parts(mean: Array1<f64>, range: Array1<f64>) -> Result<Self> {
        if mean.len() != range.len() {
            return Err(RegressionError::shape(
                format!("range of length {}", mean.len()),
                format!("length {}", range.len()),
            ));
        }
        let n_features = mean.len();
        Ok(Self {
            mean,
            range,
            n_features,
        })
    }

    /// Per-column training mean.
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Per-column training range (max - min).
    pub fn range(&self) -> &Array1<f64> {
        &self.range
    }

    fn check_features(&self, data: &Array2<f64>) -> Result<()> {
        let cols = data.ncols();
        if cols != self.n_features {
            return Err(RegressionError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: cols,
            });
        }
        Ok(())
    }
}

impl FittedTransformer for FittedCenterScaler {
    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_features(data)?;
        Ok((data - &self.mean) / &self.range)
    }

    fn inverse_transform(&self, data: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_features(data)?;
        Ok(data * &self.range + &self.mean)
    }

    fn n_features_in(&self) -> usize {
        self.n_features
    }
}
