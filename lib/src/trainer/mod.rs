use crate::{
    dataset::batch::BatchSampler,
    error::{RegressionError, Result},
    loss::Loss,
    optimizer::{Optimizer, SGD},
};
use log::{debug, info, log_enabled, Level};
use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Orchestrates mini-batch gradient descent for a linear predictor.
///
/// Combines a loss (the cost-derivative strategy) and an optimizer (the update
/// rule) to fit a coefficient vector `beta` on a design matrix. Once built via
/// [`TrainerBuilder`] it is immutable and can be reused across fits.
///
/// Every iteration draws a fresh uniform batch of rows, evaluates the loss
/// gradient on it and applies one optimizer step. The loop runs exactly
/// `max_iterations` times: there is no convergence test and no guard against
/// divergence.
pub struct Trainer<L, O = SGD>
where
    L: Loss,
    O: Optimizer,
{
    pub(crate) batch_size: usize,
    pub(crate) max_iterations: usize,
    pub(crate) alpha: f64,
    pub(crate) verbose: bool,
    pub(crate) loss_fn: L,
    pub(crate) optimizer: O,
}

/// Fluent builder for constructing a [`Trainer`] with custom hyperparameters.
///
/// Defaults:
/// - `batch_size`: 32
/// - `max_iterations`: 1000
/// - `alpha`: 0.0
/// - `verbose`: true
pub struct TrainerBuilder<L, O = SGD>
where
    L: Loss,
    O: Optimizer,
{
    batch_size: usize,
    max_iterations: usize,
    alpha: f64,
    verbose: bool,
    loss_fn: L,
    optimizer: O,
}

impl<L, O> TrainerBuilder<L, O>
where
    L: Loss,
    O: Optimizer,
{
    /// Creates a new `TrainerBuilder` with the given components.
    ///
    /// # Arguments
    /// * `loss_fn`: differentiable cost (e.g., `MSELoss`)
    /// * `optimizer`: parameter updater (e.g., `SGD`)
    pub fn new(loss_fn: L, optimizer: O) -> Self {
        Self {
            batch_size: 32,
            max_iterations: 1000,
            alpha: 0.0,
            verbose: true,
            loss_fn,
            optimizer,
        }
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Penalty strength forwarded to the loss on every step.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets verbosity for training output.
    ///
    /// When `true`, the batch cost of every iteration is logged at `debug`
    /// level. Turn it off for benchmarking since the extra cost evaluation
    /// is not free.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn build(self) -> Trainer<L, O> {
        Trainer {
            batch_size: self.batch_size,
            max_iterations: self.max_iterations,
            alpha: self.alpha,
            verbose: self.verbose,
            loss_fn: self.loss_fn,
            optimizer: self.optimizer,
        }
    }
}

impl<L, O> Trainer<L, O>
where
    L: Loss,
    O: Optimizer,
{
    /// Convenience constructor that starts the builder pattern.
    ///
    /// Equivalent to `TrainerBuilder::new(...)`.
    pub fn builder(loss_fn: L, optimizer: O) -> TrainerBuilder<L, O> {
        TrainerBuilder::new(loss_fn, optimizer)
    }

    /// Runs gradient descent from `beta0` and returns the final coefficients.
    ///
    /// All randomness (batch selection) is drawn from `rng`, so a seeded
    /// generator makes the result bit-for-bit reproducible.
    ///
    /// # Errors
    /// Everything is checked before the first iteration:
    /// - [`RegressionError::ShapeMismatch`] if `x` rows differ from `y` length
    ///   or `beta0` length differs from the column count.
    /// - [`RegressionError::InvalidParameter`] for a batch size outside
    ///   `1..=n`, zero iterations, a negative `alpha` or optimizer
    ///   hyperparameters the optimizer rejects.
    pub fn fit<R>(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        beta0: Array1<f64>,
        rng: &mut R,
    ) -> Result<Array1<f64>>
    where
        R: Rng + ?Sized,
    {
        self.validate(x, y, &beta0)?;
        let sampler = BatchSampler::new(x.nrows(), self.batch_size)?;

        let mut state = self.optimizer.init(beta0);
        for iteration in 0..self.max_iterations {
            let (batch_x, batch_y) = sampler.sample(x, y, rng);
            let beta = self.optimizer.params(&state).view();

            if self.verbose {
                let cost = self
                    .loss_fn
                    .loss(batch_x.view(), batch_y.view(), beta, self.alpha);
                debug!("Iteration {iteration}: batch cost = {cost}");
            }

            let grads = self
                .loss_fn
                .gradient(batch_x.view(), batch_y.view(), beta, self.alpha);
            state = self.optimizer.step(&state, &grads);
        }

        let beta = self.optimizer.params(&state).clone();
        if log_enabled!(Level::Info) {
            let cost = self
                .loss_fn
                .loss(x.view(), y.view(), beta.view(), self.alpha);
            info!(
                "Gradient descent finished after {} iterations: cost = {cost}",
                self.max_iterations
            );
        }
        Ok(beta)
    }

    fn validate(&self, x: &Array2<f64>, y: &Array1<f64>, beta0: &Array1<f64>) -> Result<()> {
        let (rows, cols) = x.dim();
        if rows != y.len() {
            return Err(RegressionError::shape(
                format!("{rows} targets"),
                format!("{} targets", y.len()),
            ));
        }
        if beta0.len() != cols {
            return Err(RegressionError::shape(
                format!("{cols} initial coefficients"),
                format!("{}", beta0.len()),
            ));
        }
        if self.max_iterations == 0 {
            return Err(RegressionError::InvalidParameter(
                "max_iterations must be positive".to_string(),
            ));
        }
        if self.alpha.is_nan() || self.alpha < 0.0 {
            return Err(RegressionError::InvalidParameter(format!(
                "alpha must be non-negative, got {}",
                self.alpha
            )));
        }
        self.optimizer.validate()
    }
}

/// Draws a starting coefficient vector from the standard normal distribution.
pub fn init_beta<R>(n_params: usize, rng: &mut R) -> Array1<f64>
where
    R: Rng + ?Sized,
{
    Array1::from_shape_simple_fn(n_params, || StandardNormal.sample(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loss::{sigmoid, LogisticLoss, MSELoss, RidgeLoss};
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// `y = 3 + 2x` with an explicit intercept column.
    fn line() -> (Array2<f64>, Array1<f64>) {
        let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0], [1.0, 3.0]];
        let y = array![3.0, 5.0, 7.0, 9.0];
        (x, y)
    }

    // === TrainerBuilder Tests ===

    #[test]
    fn test_trainer_builder_default_values() {
        let builder = TrainerBuilder::new(MSELoss, SGD::new(0.01));

        assert_eq!(builder.batch_size, 32);
        assert_eq!(builder.max_iterations, 1000);
        assert_eq!(builder.alpha, 0.0);
        assert!(builder.verbose);
    }

    #[test]
    fn test_trainer_builder_chaining() {
        let trainer = Trainer::builder(RidgeLoss, SGD::new(0.01))
            .batch_size(128)
            .max_iterations(250)
            .alpha(0.5)
            .verbose(false)
            .build();

        assert_eq!(trainer.batch_size, 128);
        assert_eq!(trainer.max_iterations, 250);
        assert_eq!(trainer.alpha, 0.5);
        assert!(!trainer.verbose);
    }

    #[test]
    fn test_trainer_builder_chaining_order_independent() {
        let a = TrainerBuilder::new(MSELoss, SGD::new(0.01))
            .batch_size(16)
            .max_iterations(100)
            .build();
        let b = TrainerBuilder::new(MSELoss, SGD::new(0.01))
            .max_iterations(100)
            .batch_size(16)
            .build();

        assert_eq!(a.batch_size, b.batch_size);
        assert_eq!(a.max_iterations, b.max_iterations);
    }

    // === Trainer Tests ===

    #[test]
    fn test_full_batch_gradient_descent_matches_least_squares() {
        let (x, y) = line();
        let trainer = Trainer::builder(MSELoss, SGD::new(0.1))
            .batch_size(4)
            .max_iterations(2000)
            .verbose(false)
            .build();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let beta = trainer.fit(&x, &y, Array1::zeros(2), &mut rng).unwrap();

        assert_abs_diff_eq!(beta, array![3.0, 2.0], epsilon = 1e-6);
    }

    #[test]
    fn test_momentum_gradient_descent_converges() {
        let (x, y) = line();
        let sgd = SGD::new(0.01).with_momentum(0.9).unwrap();
        let trainer = Trainer::builder(MSELoss, sgd)
            .batch_size(4)
            .max_iterations(3000)
            .verbose(false)
            .build();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let beta = trainer.fit(&x, &y, Array1::zeros(2), &mut rng).unwrap();

        assert_abs_diff_eq!(beta, array![3.0, 2.0], epsilon = 1e-4);
    }

    #[test]
    fn test_mini_batch_is_deterministic_for_a_seed() {
        let (x, y) = line();
        let sgd = SGD::new(0.05).with_momentum(0.5).unwrap();
        let trainer = Trainer::builder(MSELoss, sgd)
            .batch_size(2)
            .max_iterations(200)
            .verbose(false)
            .build();

        let run = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let beta0 = init_beta(2, &mut rng);
            trainer.fit(&x, &y, beta0, &mut rng).unwrap()
        };

        let first = run(42);
        let second = run(42);
        assert_eq!(first, second);
        assert_ne!(first, run(43));
    }

    #[test]
    fn test_ridge_gradient_descent_shrinks_weight() {
        // y = 2x, no intercept
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![2.0, 4.0, 6.0];
        let trainer = Trainer::builder(RidgeLoss, SGD::new(0.05))
            .batch_size(3)
            .max_iterations(2000)
            .alpha(1.0)
            .verbose(false)
            .build();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let beta = trainer.fit(&x, &y, array![0.0], &mut rng).unwrap();

        // Minimizer of (1/2n)Σ(2x - bx)^2 + b^2/2 is 2 * (14/3) / (14/3 + 1)
        let expected = 2.0 * (14.0 / 3.0) / (14.0 / 3.0 + 1.0);
        assert_abs_diff_eq!(beta[0], expected, epsilon = 1e-6);
        assert!(beta[0] < 2.0);
    }

    #[test]
    fn test_logistic_gradient_descent_separates_classes() {
        let x = array![[1.0, -2.0], [1.0, -1.0], [1.0, 1.0], [1.0, 2.0]];
        let y = array![0.0, 0.0, 1.0, 1.0];
        let trainer = Trainer::builder(LogisticLoss, SGD::new(0.5))
            .batch_size(4)
            .max_iterations(500)
            .verbose(false)
            .build();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let beta = trainer.fit(&x, &y, Array1::zeros(2), &mut rng).unwrap();
        let probs = x.dot(&beta).mapv(sigmoid);

        assert!(probs[0] < 0.5 && probs[1] < 0.5);
        assert!(probs[2] > 0.5 && probs[3] > 0.5);
    }

    #[test]
    fn test_large_learning_rate_diverges() {
        let (x, y) = line();
        let trainer = Trainer::builder(MSELoss, SGD::new(1e3))
            .batch_size(4)
            .max_iterations(200)
            .verbose(false)
            .build();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let beta = trainer.fit(&x, &y, Array1::zeros(2), &mut rng).unwrap();

        assert!(beta.iter().any(|b| !b.is_finite()));
    }

    #[test]
    fn test_fit_rejects_invalid_inputs() {
        let (x, y) = line();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let fit = |trainer: Trainer<MSELoss>, beta0: Array1<f64>, rng: &mut ChaCha8Rng| {
            trainer.fit(&x, &y, beta0, rng).unwrap_err()
        };
        let builder = || Trainer::builder(MSELoss, SGD::new(0.1)).batch_size(2);

        let err = fit(builder().batch_size(0).build(), Array1::zeros(2), &mut rng);
        assert!(matches!(err, RegressionError::InvalidParameter(_)));

        let err = fit(builder().batch_size(5).build(), Array1::zeros(2), &mut rng);
        assert!(matches!(err, RegressionError::InvalidParameter(_)));

        let err = fit(builder().max_iterations(0).build(), Array1::zeros(2), &mut rng);
        assert!(matches!(err, RegressionError::InvalidParameter(_)));

        let err = fit(builder().alpha(-1.0).build(), Array1::zeros(2), &mut rng);
        assert!(matches!(err, RegressionError::InvalidParameter(_)));

        let err = fit(builder().build(), Array1::zeros(3), &mut rng);
        assert!(matches!(err, RegressionError::ShapeMismatch { .. }));

        let err = fit(
            Trainer::builder(MSELoss, SGD::new(0.0)).batch_size(2).build(),
            Array1::zeros(2),
            &mut rng,
        );
        assert!(matches!(err, RegressionError::InvalidParameter(_)));
    }

    #[test]
    fn test_fit_rejects_row_target_mismatch() {
        let (x, _) = line();
        let y = array![1.0, 2.0, 3.0];
        let trainer = Trainer::builder(MSELoss, SGD::new(0.1)).batch_size(2).build();
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let err = trainer.fit(&x, &y, Array1::zeros(2), &mut rng).unwrap_err();
        assert!(matches!(err, RegressionError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_init_beta_is_seeded_standard_normal() {
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);

        let beta = init_beta(1000, &mut a);
        assert_eq!(beta, init_beta(1000, &mut b));
        assert_eq!(beta.len(), 1000);

        let mean = beta.mean().unwrap();
        let var = beta.var(0.0);
        assert!(mean.abs() < 0.15, "mean = {mean}");
        assert!((var - 1.0).abs() < 0.2, "var = {var}");
    }
}
