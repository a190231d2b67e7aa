//! Closed-form and derivative-free estimators.
//!
//! - [`solve_ols`] / [`solve_ridge`]: normal equations through an SVD
//!   pseudo-inverse (`nalgebra`).
//! - [`minimize_lasso`]: L1-penalized least squares through a Nelder-Mead
//!   simplex search (`argmin`).

pub mod lasso;
pub mod linear;

pub use lasso::{minimize_lasso, LassoMinimizer, LassoObjective};
pub use linear::{pinv, solve_ols, solve_ridge};
