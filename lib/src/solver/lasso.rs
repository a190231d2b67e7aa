//! Lasso regression by direct minimization.
//!
//! ```text
//! L(β) = (1/2n) * ‖y - Xβ‖² + α * ‖β‖₁
//! ```
//!
//! The L1 term has no derivative at zero, so the objective is handed to a
//! derivative-free Nelder-Mead simplex search from `argmin`, starting at an
//! all-ones coefficient vector. The result approximates the lasso optimum:
//! coefficients the penalty drives out land near zero, not exactly on it.

use crate::error::{RegressionError, Result};
use crate::solver::linear::check_design;
use argmin::core::{CostFunction, Error, Executor, State};
use argmin::solver::neldermead::NelderMead;
use log::debug;
use ndarray::{Array1, Array2, ArrayView1};

/// Relative step of the initial simplex along each non-zero coordinate.
const NONZERO_DELTA: f64 = 0.05;
/// Absolute step of the initial simplex along a zero coordinate.
const ZERO_DELTA: f64 = 0.00025;
/// Iteration cap per coefficient when none is configured.
const ITERATIONS_PER_PARAM: u64 = 200;

/// The lasso cost over a fixed design matrix and target vector.
pub struct LassoObjective<'a> {
    x: &'a Array2<f64>,
    y: &'a Array1<f64>,
    alpha: f64,
}

impl<'a> LassoObjective<'a> {
    pub fn new(x: &'a Array2<f64>, y: &'a Array1<f64>, alpha: f64) -> Self {
        Self { x, y, alpha }
    }

    /// Evaluates the cost at `beta`.
    pub fn evaluate(&self, beta: ArrayView1<f64>) -> f64 {
        let residual = self.y - &self.x.dot(&beta);
        let l1: f64 = beta.iter().map(|b| b.abs()).sum();
        residual.dot(&residual) / (2.0 * self.y.len() as f64) + self.alpha * l1
    }
}

impl CostFunction for LassoObjective<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, beta: &Self::Param) -> std::result::Result<Self::Output, Error> {
        Ok(self.evaluate(ArrayView1::from(beta.as_slice())))
    }
}

/// Configurable Nelder-Mead lasso minimizer.
///
/// # Example
/// ```
/// use ndarray::array;
/// use polyreg::solver::LassoMinimizer;
///
/// let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
/// let y = array![3.0, 5.0, 7.0, 9.0];
///
/// let beta = LassoMinimizer::new(0.0).with_max_iterations(2000).minimize(&x, &y).unwrap();
/// assert!((beta[0] - 3.0).abs() < 1e-2);
/// assert!((beta[1] - 2.0).abs() < 1e-2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LassoMinimizer {
    alpha: f64,
    max_iterations: Option<u64>,
}

impl LassoMinimizer {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            max_iterations: None,
        }
    }

    /// Overrides the default cap of 200 iterations per coefficient.
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Runs the simplex search and returns the best coefficients found.
    ///
    /// # Errors
    /// - [`RegressionError::ShapeMismatch`] / [`RegressionError::EmptyData`]
    ///   for an unusable design.
    /// - [`RegressionError::InvalidParameter`] for a negative `alpha`.
    /// - [`RegressionError::Solver`] if `x` or `y` holds a NaN or infinite
    ///   value, or the minimizer fails or returns no parameters.
    pub fn minimize(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<Array1<f64>> {
        check_design(x, y)?;
        if self.alpha.is_nan() || self.alpha < 0.0 {
            return Err(RegressionError::InvalidParameter(format!(
                "alpha must be non-negative, got {}",
                self.alpha
            )));
        }

        let n_params = x.ncols();
        let max_iterations = self
            .max_iterations
            .unwrap_or(ITERATIONS_PER_PARAM * n_params as u64);

        let solver: NelderMead<Vec<f64>, f64> =
            NelderMead::new(initial_simplex(&vec![1.0; n_params]));
        let problem = LassoObjective::new(x, y, self.alpha);

        let result = Executor::new(problem, solver)
            .configure(|state| state.max_iters(max_iterations))
            .run()
            .map_err(|e| RegressionError::Solver(e.to_string()))?;

        let state = result.state();
        debug!(
            "Nelder-Mead stopped after {} iterations: cost = {}, {:?}",
            state.get_iter(),
            state.get_best_cost(),
            state.get_termination_status()
        );

        let best = state
            .get_best_param()
            .ok_or_else(|| RegressionError::Solver("minimizer returned no parameters".into()))?;
        Ok(Array1::from(best.clone()))
    }
}

/// Minimizes the lasso objective with the default iteration cap.
pub fn minimize_lasso(x: &Array2<f64>, y: &Array1<f64>, alpha: f64) -> Result<Array1<f64>> {
    LassoMinimizer::new(alpha).minimize(x, y)
}

/// `x0` followed by one vertex per coordinate, each nudged along that axis.
fn initial_simplex(x0: &[f64]) -> Vec<Vec<f64>> {
    let mut simplex = Vec::with_capacity(x0.len() + 1);
    simplex.push(x0.to_vec());
    for k in 0..x0.len() {
        let mut vertex = x0.to_vec();
        vertex[k] = if vertex[k] != 0.0 {
            (1.0 + NONZERO_DELTA) * vertex[k]
        } else {
            ZERO_DELTA
        };
        simplex.push(vertex);
    }
    simplex
}
