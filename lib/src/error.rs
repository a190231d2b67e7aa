//! Error types shared by every estimator in the crate.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RegressionError>;

/// Error type for model-matrix construction, fitting and prediction.
#[derive(Debug, thiserror::Error)]
pub enum RegressionError {
    /// Lengths or shapes that must agree do not.
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// Polynomial degree that is not a non-negative whole number.
    #[error("Invalid polynomial degree: {0}")]
    InvalidDegree(String),

    /// Regressor kind that has no implementation.
    #[error("Regressor type not implemented: {0}")]
    NotImplemented(String),

    /// Invalid hyperparameter value.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Column count differs from the one seen during fit.
    #[error("Feature mismatch: expected {expected_features} features, got {got_features}")]
    FeatureMismatch {
        expected_features: usize,
        got_features: usize,
    },

    /// External solver or minimizer failed.
    #[error("Solver error: {0}")]
    Solver(String),

    /// Malformed regressor configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl RegressionError {
    pub(crate) fn shape(expected: impl ToString, got: impl ToString) -> Self {
        RegressionError::ShapeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }
}
