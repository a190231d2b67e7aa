//! Differentiable costs driving gradient descent.
//!
//! Each loss is a strategy the [`Trainer`](crate::trainer::Trainer) is generic
//! over. All of them share one signature:
//! `(X_batch, y_batch, beta, alpha) -> gradient`, so a single iteration loop
//! serves every regressor kind.

use ndarray::{Array1, ArrayView1, ArrayView2};

/// A differentiable cost over a linear predictor `X @ beta`.
///
/// Implementors must define:
/// - How to compute the scalar cost value (for logging/metrics).
/// - How to compute its gradient w.r.t. `beta`.
///
/// `alpha` is the penalty strength; losses without a penalty ignore it.
pub trait Loss {
    /// Computes the scalar cost on a batch.
    fn loss(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, beta: ArrayView1<f64>, alpha: f64)
        -> f64;

    /// Computes the gradient of the cost w.r.t. `beta` on a batch.
    fn gradient(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        beta: ArrayView1<f64>,
        alpha: f64,
    ) -> Array1<f64>;
}

/// Mean squared error: `L = (1/2n) * Σ(x_i·β - y_i)^2`
///
/// Gradient: `∂L/∂β = Xᵗ(Xβ - y) / n`
///
/// The 1/2 keeps the gradient free of a factor of two.
#[derive(Clone, Copy, Debug, Default)]
pub struct MSELoss;

impl Loss for MSELoss {
    fn loss(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        beta: ArrayView1<f64>,
        _alpha: f64,
    ) -> f64 {
        let residual = x.dot(&beta) - y;
        residual.dot(&residual) / (2.0 * y.len() as f64)
    }

    fn gradient(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        beta: ArrayView1<f64>,
        _alpha: f64,
    ) -> Array1<f64> {
        let residual = x.dot(&beta) - y;
        x.t().dot(&residual) / y.len() as f64
    }
}

/// Ridge-penalized mean squared error: `L = MSE + (α/2) * ‖β‖²`
///
/// Gradient: `∂L/∂β = Xᵗ(Xβ - y) / n + α·β`
///
/// Every coefficient is penalized, including an intercept column when the
/// design matrix has one, matching [`solve_ridge`](crate::solver::solve_ridge).
#[derive(Clone, Copy, Debug, Default)]
pub struct RidgeLoss;

impl Loss for RidgeLoss {
    fn loss(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, beta: ArrayView1<f64>, alpha: f64) -> f64 {
        MSELoss.loss(x, y, beta, alpha) + 0.5 * alpha * beta.dot(&beta)
    }

    fn gradient(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        beta: ArrayView1<f64>,
        alpha: f64,
    ) -> Array1<f64> {
        MSELoss.gradient(x, y, beta, alpha) + &(&beta * alpha)
    }
}

/// Binary cross-entropy on logits `z = Xβ` (numerically stable), plus an
/// optional L2 penalty `(α/2) * ‖β‖²`.
///
/// Computes: `L = mean(max(z,0) - z*t + log(1 + exp(-|z|)))`
///
/// Gradient: `∂L/∂β = Xᵗ(σ(Xβ) - y) / n + α·β`
#[derive(Clone, Copy, Debug, Default)]
pub struct LogisticLoss;

impl Loss for LogisticLoss {
    fn loss(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, beta: ArrayView1<f64>, alpha: f64) -> f64 {
        let logits = x.dot(&beta);
        let total: f64 = logits
            .iter()
            .zip(y.iter())
            .map(|(&z, &t)| z.max(0.0) - z * t + (-z.abs()).exp().ln_1p())
            .sum();
        total / y.len() as f64 + 0.5 * alpha * beta.dot(&beta)
    }

    fn gradient(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        beta: ArrayView1<f64>,
        alpha: f64,
    ) -> Array1<f64> {
        let residual = x.dot(&beta).mapv(sigmoid) - y;
        x.t().dot(&residual) / y.len() as f64 + &(&beta * alpha)
    }
}

/// Logistic function, stable for large `|z|`.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let ez = z.exp();
        ez / (1.0 + ez)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;

    #[test]
    fn test_mse_loss() {
        let x = array![[1.0, 0.0], [0.0, 1.0]];
        let y = array![1.0, 2.0];
        let beta = array![3.0, 5.0];

        // residuals [2, 3]: (4 + 9) / (2 * 2) = 3.25
        let loss = MSELoss.loss(x.view(), y.view(), beta.view(), 0.0);
        assert_relative_eq!(loss, 3.25);

        // Xᵗ r / n = [2, 3] / 2
        let grad = MSELoss.gradient(x.view(), y.view(), beta.view(), 0.0);
        assert_abs_diff_eq!(grad, array![1.0, 1.5], epsilon = 1e-12);
    }

    #[test]
    fn test_mse_gradient_ignores_alpha() {
        let x = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let y = array![1.0, 0.0, -1.0];
        let beta = array![0.5, -0.25];

        let plain = MSELoss.gradient(x.view(), y.view(), beta.view(), 0.0);
        let with_alpha = MSELoss.gradient(x.view(), y.view(), beta.view(), 10.0);
        assert_eq!(plain, with_alpha);
    }

    #[test]
    fn test_mse_gradient_zero_at_exact_fit() {
        let x = array![[1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
        let beta = array![3.0, 2.0];
        let y = x.dot(&beta);

        let grad = MSELoss.gradient(x.view(), y.view(), beta.view(), 0.0);
        assert_abs_diff_eq!(grad, array![0.0, 0.0], epsilon = 1e-12);
    }

    #[test]
    fn test_ridge_gradient_adds_penalty() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let y = array![1.0, 2.0];
        let beta = array![0.5, -1.0];
        let alpha = 0.3;

        let mse = MSELoss.gradient(x.view(), y.view(), beta.view(), alpha);
        let ridge = RidgeLoss.gradient(x.view(), y.view(), beta.view(), alpha);

        assert_abs_diff_eq!(ridge - mse, &beta * alpha, epsilon = 1e-12);
    }

    #[test]
    fn test_ridge_loss_adds_penalty() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0, 2.0];
        let beta = array![2.0];

        let mse = MSELoss.loss(x.view(), y.view(), beta.view(), 0.5);
        let ridge = RidgeLoss.loss(x.view(), y.view(), beta.view(), 0.5);
        // 0.5 * 0.5 * 4
        assert_relative_eq!(ridge - mse, 1.0);
    }

    #[test]
    fn test_ridge_with_zero_alpha_matches_mse() {
        let x = array![[1.0, -2.0], [0.5, 4.0], [2.0, 1.0]];
        let y = array![0.3, -0.7, 1.1];
        let beta = array![0.2, 0.1];

        assert_abs_diff_eq!(
            RidgeLoss.gradient(x.view(), y.view(), beta.view(), 0.0),
            MSELoss.gradient(x.view(), y.view(), beta.view(), 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_logistic_loss_and_gradient() {
        // Logits [0, 2, -2] through an identity design.
        let x = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        let beta = array![0.0, 2.0, -2.0];
        let y = array![1.0, 1.0, 0.0];

        // (ln 2 + 2 * ln(1 + e^-2)) / 3
        let expected_loss = (2.0f64.ln() + 2.0 * (1.0 + (-2.0f64).exp()).ln()) / 3.0;
        let loss = LogisticLoss.loss(x.view(), y.view(), beta.view(), 0.0);
        assert_relative_eq!(loss, expected_loss, epsilon = 1e-12);

        let grad = LogisticLoss.gradient(x.view(), y.view(), beta.view(), 0.0);
        let expected = array![
            (0.5 - 1.0) / 3.0,
            (sigmoid(2.0) - 1.0) / 3.0,
            sigmoid(-2.0) / 3.0
        ];
        assert_abs_diff_eq!(grad, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_logistic_numerical_stability() {
        let x = array![[1.0], [1.0]];
        let y = array![1.0, 0.0];
        let beta = array![500.0];

        let loss = LogisticLoss.loss(x.view(), y.view(), beta.view(), 0.0);
        assert!(loss.is_finite());

        let grad = LogisticLoss.gradient(x.view(), y.view(), beta.view(), 0.0);
        assert!(grad.iter().all(|g| g.is_finite()));
    }

    #[test]
    fn test_sigmoid() {
        assert_relative_eq!(sigmoid(0.0), 0.5);
        assert_relative_eq!(sigmoid(3.0) + sigmoid(-3.0), 1.0, epsilon = 1e-15);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
    }
}
