//! Polynomial regressors: design-matrix construction, optional centering,
//! estimation and train/test prediction behind one entry point.
//!
//! A [`Regressor`] is a [`RegressorKind`] plus the `fit_intercept` switch:
//!
//! - `fit_intercept = false`: the design matrix carries a leading column of
//!   ones and predictions are `X @ beta`.
//! - `fit_intercept = true`: the design matrix has no constant column. Its
//!   columns are centered with the training mean and range, and predictions are
//!   `X_centered @ beta + mean(train targets)`. Test data is always centered with
//!   the training statistics.
//!
//! # Example
//!
//! ```rust
//! use polyreg::dataset::DataSplit;
//! use polyreg::regressor::{Regressor, RegressorParams, RegressorType};
//! use rand::SeedableRng;
//!
//! let train = DataSplit::new(vec![vec![0.0, 1.0, 2.0, 3.0]], vec![1.0, 3.0, 5.0, 7.0]).unwrap();
//! let test = DataSplit::new(vec![vec![4.0]], vec![9.0]).unwrap();
//!
//! let params = RegressorParams::new().with_fit_intercept(true);
//! let regressor = Regressor::new(RegressorType::Ols, &params);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//!
//! let predictions = regressor.fit_predict(&train, &test, 1, &mut rng).unwrap();
//! assert!((predictions.test[0] - 9.0).abs() < 1e-9);
//! ```

mod kind;
mod params;

pub use kind::{RegressorKind, RegressorType, SgdSettings};
pub use params::RegressorParams;

use crate::dataset::DataSplit;
use crate::error::{RegressionError, Result};
use crate::model::{InferenceModel, LinearModel};
use crate::preprocessing::{
    CenterScaler, FittedCenterScaler, FittedTransformer, ModelMatrixBuilder, Transformer,
};
use log::debug;
use ndarray::Array1;
use rand::Rng;

/// Train and test predictions from one fit.
#[derive(Clone, Debug, PartialEq)]
pub struct Predictions {
    pub train: Array1<f64>,
    pub test: Array1<f64>,
}

/// An unfitted polynomial regressor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Regressor {
    kind: RegressorKind,
    fit_intercept: bool,
}

impl Regressor {
    pub fn new(regressor_type: RegressorType, params: &RegressorParams) -> Self {
        Self {
            kind: RegressorKind::resolve(regressor_type, params),
            fit_intercept: params.fit_intercept,
        }
    }

    /// Resolves a regressor from its configuration tag.
    ///
    /// # Errors
    /// [`RegressionError::NotImplemented`] for an unknown tag.
    pub fn from_tag(tag: &str, params: &RegressorParams) -> Result<Self> {
        Ok(Self::new(tag.parse()?, params))
    }

    pub fn kind(&self) -> &RegressorKind {
        &self.kind
    }

    pub fn fit_intercept(&self) -> bool {
        self.fit_intercept
    }

    /// Fits on `train` with polynomial terms up to degree `n_pol`.
    ///
    /// Gradient-descent kinds draw their starting point and mini-batches from
    /// `rng`; closed-form kinds leave it untouched.
    ///
    /// # Errors
    /// Any error from model-matrix construction, centering or the estimator.
    /// A degree that leaves the design matrix without columns is rejected with
    /// [`RegressionError::EmptyData`].
    ///
    /// A feature that is constant in `train` centers to NaN under
    /// `fit_intercept`. The closed-form and lasso kinds then fail with
    /// [`RegressionError::Solver`]; the gradient-descent kinds return
    /// non-finite coefficients and predictions.
    pub fn fit<R>(&self, train: &DataSplit, n_pol: usize, rng: &mut R) -> Result<FittedRegressor>
    where
        R: Rng + ?Sized,
    {
        let builder = ModelMatrixBuilder::new()
            .with_degree(n_pol)
            .with_intercept(!self.fit_intercept);
        let matrix = builder.build(train.inputs())?;
        if matrix.ncols() == 0 {
            return Err(RegressionError::EmptyData(format!(
                "degree {n_pol} without intercept column yields no features"
            )));
        }

        let (scaler, matrix, intercept) = if self.fit_intercept {
            let intercept = train.target_mean().ok_or_else(|| {
                RegressionError::EmptyData("cannot center on an empty training set".to_string())
            })?;
            let (scaler, centered) = CenterScaler::new().fit_transform(&matrix)?;
            (Some(scaler), centered, intercept)
        } else {
            (None, matrix, 0.0)
        };

        debug!(
            "Fitting {} on a {}x{} design matrix (fit_intercept = {})",
            self.kind.regressor_type(),
            matrix.nrows(),
            matrix.ncols(),
            self.fit_intercept
        );
        let beta = self.kind.estimate(&matrix, train.targets(), rng)?;

        Ok(FittedRegressor {
            regressor_type: self.kind.regressor_type(),
            builder,
            n_features: train.n_features(),
            scaler,
            model: LinearModel::new(beta).with_intercept(intercept),
        })
    }

    /// Fits on `train` and predicts both `train` and `test`.
    pub fn fit_predict<R>(
        &self,
        train: &DataSplit,
        test: &DataSplit,
        n_pol: usize,
        rng: &mut R,
    ) -> Result<Predictions>
    where
        R: Rng + ?Sized,
    {
        let fitted = self.fit(train, n_pol, rng)?;
        Ok(Predictions {
            train: fitted.predict(train.inputs())?,
            test: fitted.predict(test.inputs())?,
        })
    }
}

/// A fitted regressor: everything needed to turn raw feature sequences into
/// predictions.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedRegressor {
    regressor_type: RegressorType,
    builder: ModelMatrixBuilder,
    n_features: usize,
    scaler: Option<FittedCenterScaler>,
    model: LinearModel,
}

impl FittedRegressor {
    /// Predicts targets for `inputs` (one sequence per feature).
    ///
    /// # Errors
    /// - [`RegressionError::FeatureMismatch`] if the number of feature sequences
    ///   differs from training.
    /// - [`RegressionError::ShapeMismatch`] if the sequences differ in length.
    pub fn predict(&self, inputs: &[Vec<f64>]) -> Result<Array1<f64>> {
        if inputs.len() != self.n_features {
            return Err(RegressionError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: inputs.len(),
            });
        }

        let matrix = self.builder.build(inputs)?;
        let matrix = match &self.scaler {
            Some(scaler) => scaler.transform(&matrix)?,
            None => matrix,
        };
        self.model.predict_batch(&matrix)
    }

    pub fn regressor_type(&self) -> RegressorType {
        self.regressor_type
    }

    /// Fitted coefficients, one per design-matrix column.
    pub fn coefficients(&self) -> &Array1<f64> {
        self.model.coefficients()
    }

    /// Constant offset added to every prediction.
    pub fn intercept(&self) -> f64 {
        self.model.intercept()
    }

    /// Training centering state, present when fitted with `fit_intercept`.
    pub fn scaler(&self) -> Option<&FittedCenterScaler> {
        self.scaler.as_ref()
    }

    pub fn model_matrix_builder(&self) -> &ModelMatrixBuilder {
        &self.builder
    }
}

/// Fits `regressor_type` on `train` and predicts `train` and `test`.
pub fn regress<R>(
    regressor_type: RegressorType,
    params: &RegressorParams,
    train: &DataSplit,
    test: &DataSplit,
    n_pol: usize,
    rng: &mut R,
) -> Result<Predictions>
where
    R: Rng + ?Sized,
{
    Regressor::new(regressor_type, params).fit_predict(train, test, n_pol, rng)
}

macro_rules! shorthand {
    ($($(#[$doc:meta])* $name:ident => $kind:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name<R>(
                params: &RegressorParams,
                train: &DataSplit,
                test: &DataSplit,
                n_pol: usize,
                rng: &mut R,
            ) -> Result<Predictions>
            where
                R: Rng + ?Sized,
            {
                regress(RegressorType::$kind, params, train, test, n_pol, rng)
            }
        )*
    };
}

shorthand! {
    /// Ordinary least squares.
    ols => Ols;
    /// Least squares by momentum mini-batch gradient descent.
    ols_sgd => OlsSgd;
    /// L1-penalized least squares.
    lasso => Lasso;
    /// L2-penalized least squares, closed form.
    ridge => Ridge;
    /// L2-penalized least squares by gradient descent.
    ridge_sgd => RidgeSgd;
    /// Logistic regression by gradient descent.
    logistic => Logistic;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn quadratic() -> (DataSplit, DataSplit) {
        // y = 1 + 2x - x^2
        let f = |x: f64| 1.0 + 2.0 * x - x * x;
        let train_x = vec![-2.0, -1.0, 0.0, 0.5, 1.0, 2.0, 3.0];
        let test_x = vec![-1.5, 1.5, 4.0];
        let train_y: Vec<f64> = train_x.iter().map(|&x| f(x)).collect();
        let test_y: Vec<f64> = test_x.iter().map(|&x| f(x)).collect();
        (
            DataSplit::new(vec![train_x], train_y).unwrap(),
            DataSplit::new(vec![test_x], test_y).unwrap(),
        )
    }

    #[test]
    fn test_ols_without_intercept_flag_recovers_quadratic() {
        let (train, test) = quadratic();
        let regressor = Regressor::new(RegressorType::Ols, &RegressorParams::default());
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let fitted = regressor.fit(&train, 2, &mut rng).unwrap();

        assert_abs_diff_eq!(*fitted.coefficients(), array![1.0, 2.0, -1.0], epsilon = 1e-8);
        assert_eq!(fitted.intercept(), 0.0);
        assert!(fitted.scaler().is_none());

        let preds = fitted.predict(test.inputs()).unwrap();
        assert_abs_diff_eq!(preds, *test.targets(), epsilon = 1e-8);
    }

    #[test]
    fn test_ols_with_intercept_flag_matches_uncentered_fit() {
        let (train, test) = quadratic();
        let params = RegressorParams::new().with_fit_intercept(true);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let predictions = ols(&params, &train, &test, 2, &mut rng).unwrap();

        assert_abs_diff_eq!(predictions.train, *train.targets(), epsilon = 1e-8);
        assert_abs_diff_eq!(predictions.test, *test.targets(), epsilon = 1e-8);
    }

    #[test]
    fn test_intercept_flag_uses_train_mean_and_no_ones_column() {
        let (train, _) = quadratic();
        let params = RegressorParams::new().with_fit_intercept(true);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let fitted = Regressor::new(RegressorType::Ridge, &params)
            .fit(&train, 2, &mut rng)
            .unwrap();

        assert_eq!(fitted.coefficients().len(), 2);
        assert_abs_diff_eq!(
            fitted.intercept(),
            train.target_mean().unwrap(),
            epsilon = 1e-12
        );
        assert!(!fitted.model_matrix_builder().includes_intercept());
        assert_eq!(fitted.scaler().unwrap().n_features_in(), 2);
    }

    #[test]
    fn test_from_tag() {
        let params = RegressorParams::default();

        let regressor = Regressor::from_tag("ridge_sgd", &params).unwrap();
        assert_eq!(regressor.kind().regressor_type(), RegressorType::RidgeSgd);

        let err = Regressor::from_tag("bayesian", &params).unwrap_err();
        assert!(matches!(err, RegressionError::NotImplemented(_)));
    }

    #[test]
    fn test_predict_rejects_wrong_feature_count() {
        let (train, _) = quadratic();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let fitted = Regressor::new(RegressorType::Ols, &RegressorParams::default())
            .fit(&train, 1, &mut rng)
            .unwrap();

        let err = fitted
            .predict(&[vec![1.0, 2.0], vec![3.0, 4.0]])
            .unwrap_err();
        assert!(matches!(
            err,
            RegressionError::FeatureMismatch {
                expected_features: 1,
                got_features: 2
            }
        ));
    }

    #[test]
    fn test_degree_zero_with_intercept_flag_has_no_features() {
        let (train, _) = quadratic();
        let params = RegressorParams::new().with_fit_intercept(true);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let err = Regressor::new(RegressorType::Ols, &params)
            .fit(&train, 0, &mut rng)
            .unwrap_err();
        assert!(matches!(err, RegressionError::EmptyData(_)));
    }

    #[test]
    fn test_degree_zero_without_intercept_flag_predicts_mean() {
        let (train, test) = quadratic();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let predictions = Regressor::new(RegressorType::Ols, &RegressorParams::default())
            .fit_predict(&train, &test, 0, &mut rng)
            .unwrap();

        let mean = train.target_mean().unwrap();
        assert!(predictions.test.iter().all(|p| (p - mean).abs() < 1e-9));
    }

    #[test]
    fn test_sgd_batch_larger_than_train_is_rejected() {
        let (train, test) = quadratic();
        let params = RegressorParams::new().with_batch_size(100);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let err = ols_sgd(&params, &train, &test, 1, &mut rng).unwrap_err();
        assert!(matches!(err, RegressionError::InvalidParameter(_)));
    }
}
