//! Mini-batch selection.
//!
//! Every call draws `batch_size` distinct row indices uniformly at random;
//! there is no epoch partition and consecutive batches may overlap.

use crate::error::{RegressionError, Result};
use ndarray::{Array1, Array2, Axis};
use rand::Rng;

/// Draws random mini-batches of a fixed size from `(X, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchSampler {
    n_samples: usize,
    batch_size: usize,
}

impl BatchSampler {
    /// # Errors
    /// Returns [`RegressionError::InvalidParameter`] unless
    /// `1 <= batch_size <= n_samples`.
    pub fn new(n_samples: usize, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(RegressionError::InvalidParameter(
                "batch_size must be positive".to_string(),
            ));
        }
        if batch_size > n_samples {
            return Err(RegressionError::InvalidParameter(format!(
                "batch_size {batch_size} exceeds the {n_samples} available samples"
            )));
        }
        Ok(Self {
            n_samples,
            batch_size,
        })
    }

    /// Row indices of the next batch.
    pub fn indices<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<usize> {
        rand::seq::index::sample(rng, self.n_samples, self.batch_size).into_vec()
    }

    /// Gathers the rows of the next batch.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        rng: &mut R,
    ) -> (Array2<f64>, Array1<f64>) {
        let indices = self.indices(rng);
        (x.select(Axis(0), &indices), y.select(Axis(0), &indices))
    }
}
