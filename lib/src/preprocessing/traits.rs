//! Core traits for preprocessing transformers.
//!
//! - [`Transformer`]: learns parameters from training data.
//! - [`FittedTransformer`]: replays the learned transform on unseen data.

use crate::error::Result;
use ndarray::Array2;

/// Trait for unfitted transformers.
///
/// A transformer learns parameters from training data and can then transform
/// new data using those learned parameters.
pub trait Transformer: Clone {
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer;

    /// Fit the transformer to the training data.
    ///
    /// # Errors
    /// Returns [`RegressionError`](crate::RegressionError) if the data is empty
    /// or its shape is incompatible with the transformer.
    fn fit(&self, data: &Array2<f64>) -> Result<Self::Fitted>;

    /// Fit the transformer and transform the same data in one step.
    ///
    /// Returns the fitted transformer alongside the transformed data so the
    /// learned parameters can be replayed on other data.
    fn fit_transform(&self, data: &Array2<f64>) -> Result<(Self::Fitted, Array2<f64>)> {
        let fitted = self.fit(data)?;
        let transformed = fitted.transform(data)?;
        Ok((fitted, transformed))
    }
}

/// Trait for fitted transformers.
pub trait FittedTransformer: Clone {
    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`RegressionError::FeatureMismatch`](crate::RegressionError::FeatureMismatch)
    /// if the column count differs from the one seen during fit.
    fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>>;

    /// Reverse the transformation.
    fn inverse_transform(&self, data: &Array2<f64>) -> Result<Array2<f64>>;

    /// Returns the number of features seen during fit.
    fn n_features_in(&self) -> usize;
}
