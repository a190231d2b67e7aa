//! Polynomial model-matrix construction.
//!
//! Expands raw feature sequences into a design matrix of polynomial and
//! interaction terms.
//!
//! For two features `[a, b]` and degree 2 the columns are
//! `[1, a, b, a^2, ab, b^2]`: an optional bias column, then every
//! combination-with-replacement of feature indices, grouped by degree and
//! enumerated in non-decreasing index order.

use crate::error::{RegressionError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Polynomial degree of a model matrix.
///
/// In-process callers construct one from a `usize`. Degrees that arrive as
/// arbitrary numbers (e.g. from a JSON config) go through `TryFrom`, which
/// rejects negative and fractional values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degree(usize);

impl Degree {
    pub const fn new(degree: usize) -> Self {
        Self(degree)
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for Degree {
    fn from(degree: usize) -> Self {
        Self(degree)
    }
}

impl TryFrom<i64> for Degree {
    type Error = RegressionError;

    fn try_from(value: i64) -> Result<Self> {
        usize::try_from(value)
            .map(Degree)
            .map_err(|_| RegressionError::InvalidDegree(format!("{value} is negative")))
    }
}

impl TryFrom<f64> for Degree {
    type Error = RegressionError;

    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(RegressionError::InvalidDegree(format!(
                "{value} is not a whole number"
            )));
        }
        if value < 0.0 || value > u32::MAX as f64 {
            return Err(RegressionError::InvalidDegree(format!(
                "{value} is out of range"
            )));
        }
        Ok(Degree(value as usize))
    }
}

/// Builds polynomial design matrices from column-major feature sequences.
///
/// # Example
/// ```
/// use polyreg::preprocessing::ModelMatrixBuilder;
///
/// let x = vec![1.0, 2.0];
/// let y = vec![3.0, 4.0];
///
/// let matrix = ModelMatrixBuilder::new()
///     .with_degree(2)
///     .with_intercept(false)
///     .build(&[x, y])
///     .unwrap();
///
/// // [x, y, x*x, x*y, y*y]
/// assert_eq!(matrix.row(0).to_vec(), vec![1.0, 3.0, 1.0, 3.0, 9.0]);
/// assert_eq!(matrix.row(1).to_vec(), vec![2.0, 4.0, 4.0, 8.0, 16.0]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelMatrixBuilder {
    /// Maximum degree of polynomial terms.
    degree: Degree,
    /// If true, prepend a column of ones.
    include_intercept: bool,
}

impl Default for ModelMatrixBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelMatrixBuilder {
    /// Degree 1 with an intercept column.
    pub fn new() -> Self {
        Self {
            degree: Degree(1),
            include_intercept: true,
        }
    }

    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = Degree(degree);
        self
    }

    pub fn with_intercept(mut self, include_intercept: bool) -> Self {
        self.include_intercept = include_intercept;
        self
    }

    pub fn degree(&self) -> Degree {
        self.degree
    }

    pub fn includes_intercept(&self) -> bool {
        self.include_intercept
    }

    /// Feature-index combinations backing each output column, in column order.
    ///
    /// The intercept, when included, is the empty combination.
    pub fn combinations(&self, n_features: usize) -> Vec<Vec<usize>> {
        let mut combinations = Vec::new();

        if self.include_intercept {
            combinations.push(Vec::new());
        }

        for d in 1..=self.degree.get() {
            combinations_with_replacement(n_features, d, &mut Vec::new(), &mut combinations);
        }

        combinations
    }

    /// Number of output columns for `n_features` input features.
    pub fn n_columns(&self, n_features: usize) -> usize {
        self.combinations(n_features).len()
    }

    /// Expands `data_points` (one sequence per feature) into a design matrix.
    ///
    /// # Errors
    /// - [`RegressionError::EmptyData`] if there are no feature sequences.
    /// - [`RegressionError::ShapeMismatch`] if the sequences differ in length.
    pub fn build(&self, data_points: &[Vec<f64>]) -> Result<Array2<f64>> {
        let first = data_points.first().ok_or_else(|| {
            RegressionError::EmptyData("model matrix needs at least one feature".to_string())
        })?;
        let n_rows = first.len();

        if let Some((idx, bad)) = data_points
            .iter()
            .enumerate()
            .find(|(_, points)| points.len() != n_rows)
        {
            return Err(RegressionError::shape(
                format!("{n_rows} observations per feature"),
                format!("{} observations in feature {idx}", bad.len()),
            ));
        }

        let columns = self.combinations(data_points.len());
        let mut matrix = Array2::zeros((n_rows, columns.len()));

        for (mut column, indices) in matrix.columns_mut().into_iter().zip(&columns) {
            let mut product = Array1::<f64>::ones(n_rows);
            for &idx in indices {
                product
                    .iter_mut()
                    .zip(&data_points[idx])
                    .for_each(|(p, &x)| *p *= x);
            }
            column.assign(&product);
        }

        Ok(matrix)
    }
}

/// Appends every non-decreasing index sequence of length `remaining` drawn
/// from `0..n_features`, continuing from `current`.
fn combinations_with_replacement(
    n_features: usize,
    remaining: usize,
    current: &mut Vec<usize>,
    result: &mut Vec<Vec<usize>>,
) {
    if remaining == 0 {
        result.push(current.clone());
        return;
    }

    let start = current.last().copied().unwrap_or(0);

    for i in start..n_features {
        current.push(i);
        combinations_with_replacement(n_features, remaining - 1, current, result);
        current.pop();
    }
}
