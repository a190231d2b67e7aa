//! Regression metrics over predictions and targets.

use crate::error::{RegressionError, Result};
use ndarray::ArrayView1;

fn check(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(RegressionError::shape(
            format!("{} predictions", y_true.len()),
            format!("{} predictions", y_pred.len()),
        ));
    }
    if y_true.is_empty() {
        return Err(RegressionError::EmptyData(
            "metrics need at least one prediction".to_string(),
        ));
    }
    Ok(())
}

/// Mean squared error.
pub fn mse(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
    check(y_true, y_pred)?;
    let residual = &y_true - &y_pred;
    Ok(residual.dot(&residual) / y_true.len() as f64)
}

/// Root mean squared error.
pub fn rmse(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
    mse(y_true, y_pred).map(f64::sqrt)
}

/// Mean absolute error.
pub fn mae(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
    check(y_true, y_pred)?;
    let total: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).abs())
        .sum();
    Ok(total / y_true.len() as f64)
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// Constant targets give `SS_tot = 0`; the result is then `1.0` for a perfect
/// fit and `-inf` otherwise.
pub fn r_squared(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
    check(y_true, y_pred)?;
    let mean = y_true.sum() / y_true.len() as f64;
    let residual = &y_true - &y_pred;
    let ss_res = residual.dot(&residual);
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { f64::NEG_INFINITY });
    }
    Ok(1.0 - ss_res / ss_tot)
}
