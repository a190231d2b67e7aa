use crate::error::{RegressionError, Result};
use crate::loss::{LogisticLoss, Loss, MSELoss, RidgeLoss};
use crate::optimizer::SGD;
use crate::regressor::RegressorParams;
use crate::solver::{minimize_lasso, solve_ols, solve_ridge};
use crate::trainer::{init_beta, Trainer};
use log::{log_enabled, Level};
use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of a regressor kind, as used in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressorType {
    Ols,
    OlsSgd,
    Lasso,
    Ridge,
    RidgeSgd,
    Logistic,
}

impl RegressorType {
    pub const ALL: [RegressorType; 6] = [
        RegressorType::Ols,
        RegressorType::OlsSgd,
        RegressorType::Lasso,
        RegressorType::Ridge,
        RegressorType::RidgeSgd,
        RegressorType::Logistic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegressorType::Ols => "ols",
            RegressorType::OlsSgd => "ols_sgd",
            RegressorType::Lasso => "lasso",
            RegressorType::Ridge => "ridge",
            RegressorType::RidgeSgd => "ridge_sgd",
            RegressorType::Logistic => "logistic",
        }
    }
}

impl fmt::Display for RegressorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegressorType {
    type Err = RegressionError;

    fn from_str(tag: &str) -> Result<Self> {
        RegressorType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| RegressionError::NotImplemented(tag.to_string()))
    }
}

/// Settings of a gradient-descent fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SgdSettings {
    pub learning_rate: f64,
    pub max_iterations: usize,
    pub momentum: f64,
    pub batch_size: usize,
    pub alpha: f64,
}

impl SgdSettings {
    fn from_params(params: &RegressorParams, alpha: f64) -> Self {
        Self {
            learning_rate: params.learning_rate,
            max_iterations: params.max_iterations,
            momentum: params.momentum,
            batch_size: params.batch_size,
            alpha,
        }
    }

    /// Runs momentum mini-batch gradient descent on `loss` from a standard
    /// normal starting point.
    pub fn descend<L, R>(
        &self,
        loss: L,
        x: &Array2<f64>,
        y: &Array1<f64>,
        rng: &mut R,
    ) -> Result<Array1<f64>>
    where
        L: Loss,
        R: Rng + ?Sized,
    {
        let optimizer = SGD::new(self.learning_rate).with_momentum(self.momentum)?;
        let trainer = Trainer::builder(loss, optimizer)
            .batch_size(self.batch_size)
            .max_iterations(self.max_iterations)
            .alpha(self.alpha)
            .verbose(log_enabled!(Level::Debug))
            .build();

        let beta0 = init_beta(x.ncols(), rng);
        trainer.fit(x, y, beta0, rng)
    }
}

/// A regressor kind together with exactly the settings it uses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegressorKind {
    /// Ordinary least squares via the pseudo-inverse.
    Ols,
    /// Least squares by gradient descent; `alpha` is always zero.
    OlsSgd(SgdSettings),
    /// L1-penalized least squares via Nelder-Mead.
    Lasso { alpha: f64 },
    /// L2-penalized least squares via the pseudo-inverse.
    Ridge { alpha: f64 },
    /// L2-penalized least squares by gradient descent.
    RidgeSgd(SgdSettings),
    /// Cross-entropy on sigmoid outputs by gradient descent.
    Logistic(SgdSettings),
}

impl RegressorKind {
    /// Picks the settings `regressor_type` needs out of `params`.
    pub fn resolve(regressor_type: RegressorType, params: &RegressorParams) -> Self {
        match regressor_type {
            RegressorType::Ols => RegressorKind::Ols,
            RegressorType::OlsSgd => RegressorKind::OlsSgd(SgdSettings::from_params(params, 0.0)),
            RegressorType::Lasso => RegressorKind::Lasso {
                alpha: params.alpha,
            },
            RegressorType::Ridge => RegressorKind::Ridge {
                alpha: params.alpha,
            },
            RegressorType::RidgeSgd => {
                RegressorKind::RidgeSgd(SgdSettings::from_params(params, params.alpha))
            }
            RegressorType::Logistic => {
                RegressorKind::Logistic(SgdSettings::from_params(params, params.alpha))
            }
        }
    }

    pub fn regressor_type(&self) -> RegressorType {
        match self {
            RegressorKind::Ols => RegressorType::Ols,
            RegressorKind::OlsSgd(_) => RegressorType::OlsSgd,
            RegressorKind::Lasso { .. } => RegressorType::Lasso,
            RegressorKind::Ridge { .. } => RegressorType::Ridge,
            RegressorKind::RidgeSgd(_) => RegressorType::RidgeSgd,
            RegressorKind::Logistic(_) => RegressorType::Logistic,
        }
    }

    /// Fits coefficients for the design matrix `x` against targets `y`.
    ///
    /// Closed-form kinds never touch `rng`.
    pub fn estimate<R>(&self, x: &Array2<f64>, y: &Array1<f64>, rng: &mut R) -> Result<Array1<f64>>
    where
        R: Rng + ?Sized,
    {
        match self {
            RegressorKind::Ols => solve_ols(x, y),
            RegressorKind::Lasso { alpha } => minimize_lasso(x, y, *alpha),
            RegressorKind::Ridge { alpha } => solve_ridge(x, y, *alpha),
            RegressorKind::OlsSgd(settings) => settings.descend(MSELoss, x, y, rng),
            RegressorKind::RidgeSgd(settings) => settings.descend(RidgeLoss, x, y, rng),
            RegressorKind::Logistic(settings) => settings.descend(LogisticLoss, x, y, rng),
        }
    }
}
