//! Least squares through the normal equations.
//!
//! ```text
//! OLS:   beta = pinv(XᵗX) Xᵗy
//! Ridge: beta = pinv(XᵗX + αI) Xᵗy
//! ```
//!
//! The pseudo-inverse keeps rank-deficient designs (duplicated or collinear
//! polynomial terms) solvable: it returns the minimum-norm solution instead of
//! failing.

use crate::error::{RegressionError, Result};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Relative cutoff below which singular values count as zero.
const RCOND: f64 = 1e-15;

/// Moore-Penrose pseudo-inverse of a square or rectangular matrix.
///
/// Singular values smaller than `1e-15 * σ_max` are discarded.
///
/// # Errors
/// [`RegressionError::Solver`] if `matrix` holds a NaN or infinite entry, or
/// if the SVD cannot be inverted.
pub fn pinv(matrix: &Array2<f64>) -> Result<Array2<f64>> {
    if matrix.iter().any(|v| !v.is_finite()) {
        return Err(RegressionError::Solver(
            "cannot pseudo-invert a matrix with non-finite entries".to_string(),
        ));
    }
    let (rows, cols) = matrix.dim();
    let dense = DMatrix::from_fn(rows, cols, |i, j| matrix[[i, j]]);

    let svd = dense.svd(true, true);
    let cutoff = RCOND * svd.singular_values.max();
    let inverse = svd
        .pseudo_inverse(cutoff)
        .map_err(|e| RegressionError::Solver(format!("pseudo-inverse failed: {e}")))?;

    Ok(Array2::from_shape_fn(inverse.shape(), |(i, j)| inverse[(i, j)]))
}

/// Ordinary least squares coefficients for `X @ beta ≈ y`.
///
/// # Errors
/// - [`RegressionError::ShapeMismatch`] if `x` rows differ from `y` length.
/// - [`RegressionError::EmptyData`] if `x` has no rows or no columns.
/// - [`RegressionError::Solver`] if `x` or `y` holds a NaN or infinite value
///   (such as a zero-range column after centering), or the normal equations
///   overflow.
pub fn solve_ols(x: &Array2<f64>, y: &Array1<f64>) -> Result<Array1<f64>> {
    solve_normal_equations(x, y, 0.0)
}

/// Ridge coefficients: every column, including an intercept column, is
/// penalized by `alpha`.
///
/// # Errors
/// As [`solve_ols`], plus [`RegressionError::InvalidParameter`] for a negative
/// or NaN `alpha`.
pub fn solve_ridge(x: &Array2<f64>, y: &Array1<f64>, alpha: f64) -> Result<Array1<f64>> {
    if alpha.is_nan() || alpha < 0.0 {
        return Err(RegressionError::InvalidParameter(format!(
            "alpha must be non-negative, got {alpha}"
        )));
    }
    solve_normal_equations(x, y, alpha)
}

fn solve_normal_equations(x: &Array2<f64>, y: &Array1<f64>, alpha: f64) -> Result<Array1<f64>> {
    check_design(x, y)?;

    let mut gram = x.t().dot(x);
    if alpha != 0.0 {
        gram.diag_mut().mapv_inplace(|d| d + alpha);
    }
    let xty = x.t().dot(y);

    Ok(pinv(&gram)?.dot(&xty))
}

pub(crate) fn check_design(x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
    let (rows, cols) = x.dim();
    if rows != y.len() {
        return Err(RegressionError::shape(
            format!("{rows} targets"),
            format!("{} targets", y.len()),
        ));
    }
    if rows == 0 || cols == 0 {
        return Err(RegressionError::EmptyData(format!(
            "design matrix is {rows}x{cols}"
        )));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(RegressionError::Solver(
            "design matrix or targets contain non-finite values".to_string(),
        ));
    }
    Ok(())
}
