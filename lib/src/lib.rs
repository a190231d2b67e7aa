//! # polyreg
//!
//! Linear regression over a polynomial feature basis, with a small family of
//! estimators that share one fitting and prediction path.
//!
//! ## Estimators
//!
//! | Kind        | Method                                               |
//! |-------------|------------------------------------------------------|
//! | `ols`       | normal equations via SVD pseudo-inverse              |
//! | `ridge`     | regularized normal equations via pseudo-inverse      |
//! | `lasso`     | Nelder-Mead minimization of the L1-penalized cost    |
//! | `ols_sgd`   | momentum mini-batch gradient descent on MSE          |
//! | `ridge_sgd` | momentum mini-batch gradient descent on MSE + L2     |
//! | `logistic`  | momentum mini-batch gradient descent on cross-entropy|
//!
//! ## Core Design Principles
//!
//! - **Training/Inference Separation**: fitting returns a
//!   [`FittedRegressor`](regressor::FittedRegressor) holding only what prediction
//!   needs (degree, training centering state, coefficients).
//! - **Strategy-based gradient descent**: one [`trainer::Trainer`] loop serves
//!   every gradient-descent kind; the [`loss::Loss`] it is generic over supplies
//!   the gradient.
//! - **Explicit randomness**: every stochastic fit draws from a caller-supplied
//!   [`rand::Rng`], so a seeded generator reproduces a fit exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use polyreg::dataset::DataSplit;
//! use polyreg::metrics::r_squared;
//! use polyreg::regressor::{ridge_sgd, RegressorParams};
//! use rand::SeedableRng;
//!
//! let xs: Vec<f64> = (0..40).map(|i| i as f64 / 10.0).collect();
//! let ys: Vec<f64> = xs.iter().map(|x| 0.5 + x - 0.25 * x * x).collect();
//! let train = DataSplit::new(vec![xs[..30].to_vec()], ys[..30].to_vec()).unwrap();
//! let test = DataSplit::new(vec![xs[30..].to_vec()], ys[30..].to_vec()).unwrap();
//!
//! let params = RegressorParams::new()
//!     .with_fit_intercept(true)
//!     .with_learning_rate(0.5)
//!     .with_momentum(0.9)
//!     .with_batch_size(30)
//!     .with_max_iterations(3000)
//!     .with_alpha(1e-6);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! let predictions = ridge_sgd(&params, &train, &test, 2, &mut rng).unwrap();
//! let score = r_squared(train.targets().view(), predictions.train.view()).unwrap();
//! assert!(score > 0.99);
//! ```
//!
//! ## Module Structure
//!
//! - `preprocessing`: polynomial model matrices and mean/range centering
//! - `loss`: cost-derivative strategies (MSE, ridge, logistic)
//! - `optimizer`: parameter update rules (momentum SGD)
//! - `dataset`: train/test splits and mini-batch sampling
//! - `trainer`: gradient-descent loop orchestration
//! - `solver`: closed-form and derivative-free estimators
//! - `model`: fitted linear predictors
//! - `regressor`: kind dispatch, centering and train/test prediction
//! - `metrics`: regression scores

/// Train/test splits and mini-batch sampling.
pub mod dataset;

/// Crate error type.
pub mod error;

/// Differentiable costs for gradient descent.
pub mod loss;

/// Regression metrics.
pub mod metrics;

/// Fitted predictors.
pub mod model;

/// Optimization algorithms for parameter updates.
pub mod optimizer;

/// Feature preprocessing: polynomial expansion and centering.
pub mod preprocessing;

/// Regressor kinds and the fit/predict entry points.
pub mod regressor;

/// Closed-form and derivative-free estimators.
pub mod solver;

/// Gradient-descent loop orchestration.
pub mod trainer;

pub use error::{RegressionError, Result};
pub use regressor::{
    FittedRegressor, Predictions, Regressor, RegressorKind, RegressorParams, RegressorType,
};
