use crate::error::{RegressionError, Result};
use ndarray::Array1;

/// Trait for gradient-based optimizers.
///
/// Optimizers turn a gradient into a parameter update. Training logic
/// ([`Trainer`](crate::trainer::Trainer)) is decoupled from the update rule, so
/// any loss can be paired with any optimizer.
///
/// An optimizer owns no mutable state: whatever it carries between steps lives
/// in its associated [`State`](Optimizer::State), which `step` consumes by
/// reference and returns anew.
pub trait Optimizer {
    /// Per-run optimizer state (parameters plus any running statistics).
    type State;

    /// Creates the initial state around a starting parameter vector.
    fn init(&self, params: Array1<f64>) -> Self::State;

    /// Performs one update and returns the new state.
    fn step(&self, state: &Self::State, gradients: &Array1<f64>) -> Self::State;

    /// Current parameters held by a state.
    fn params<'a>(&self, state: &'a Self::State) -> &'a Array1<f64>;

    /// Checks hyperparameters before a run starts.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Parameters and velocity carried between momentum SGD steps.
#[derive(Clone, Debug, PartialEq)]
pub struct MomentumState {
    pub params: Array1<f64>,
    pub velocity: Array1<f64>,
}

impl MomentumState {
    /// Starts from `params` with zero velocity.
    pub fn new(params: Array1<f64>) -> Self {
        let velocity = Array1::zeros(params.len());
        Self { params, velocity }
    }
}

/// Stochastic Gradient Descent with classical (heavy-ball) momentum.
///
/// ```text
/// v ← μ · v - η · ∇L(θ)
/// θ ← θ + v
/// ```
/// where `η` is the learning rate and `μ` the momentum. With `μ = 0` this is
/// plain SGD. No safeguard against divergence: an oversized learning rate
/// produces non-finite parameters.
///
/// # Example
/// ```rust
/// use ndarray::array;
/// use polyreg::optimizer::{Optimizer, SGD};
///
/// let sgd = SGD::new(0.1).with_momentum(0.9).unwrap();
/// let state = sgd.init(array![1.0, 2.0]);
/// let state = sgd.step(&state, &array![1.0, -1.0]);
/// assert_eq!(state.velocity, array![-0.1, 0.1]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SGD {
    lr: f64,
    momentum: f64,
}

impl SGD {
    /// Creates a new SGD optimizer with the specified learning rate and no momentum.
    pub fn new(lr: f64) -> Self {
        Self { lr, momentum: 0.0 }
    }

    /// Sets the momentum coefficient.
    ///
    /// # Errors
    /// Returns [`RegressionError::InvalidParameter`] unless `0 <= momentum < 1`.
    pub fn with_momentum(mut self, momentum: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&momentum) {
            return Err(RegressionError::InvalidParameter(format!(
                "momentum must lie in [0, 1), got {momentum}"
            )));
        }
        self.momentum = momentum;
        Ok(self)
    }

    /// Returns the current learning rate.
    pub fn learning_rate(&self) -> f64 {
        self.lr
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }
}

impl Optimizer for SGD {
    type State = MomentumState;

    fn init(&self, params: Array1<f64>) -> MomentumState {
        MomentumState::new(params)
    }

    fn step(&self, state: &MomentumState, gradients: &Array1<f64>) -> MomentumState {
        let velocity = &state.velocity * self.momentum - gradients * self.lr;
        let params = &state.params + &velocity;
        MomentumState { params, velocity }
    }

    fn params<'a>(&self, state: &'a MomentumState) -> &'a Array1<f64> {
        &state.params
    }

    fn validate(&self) -> Result<()> {
        if !self.lr.is_finite() || self.lr <= 0.0 {
            return Err(RegressionError::InvalidParameter(format!(
                "learning_rate must be positive and finite, got {}",
                self.lr
            )));
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(RegressionError::InvalidParameter(format!(
                "momentum must lie in [0, 1), got {}",
                self.momentum
            )));
        }
        Ok(())
    }
}
