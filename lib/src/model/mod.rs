//! Fitted predictors.
//!
//! Training lives in [`trainer`](crate::trainer) and [`solver`](crate::solver);
//! what comes out of either is a plain coefficient vector that
//! [`linear::LinearModel`] turns into predictions.

pub mod linear;

pub use linear::LinearModel;

/// Inference-only model: maps inputs to predictions, nothing else.
///
/// A fitted model is free from training hyperparameters.
pub trait InferenceModel {
    type InputSingle: ?Sized;
    type InputBatch: ?Sized;
    type OutputSingle;
    type OutputBatch;

    /// Predict on a single sample (feature vector).
    fn predict(&self, input: &Self::InputSingle) -> crate::Result<Self::OutputSingle>;

    /// Predict on a batch of samples, one per row.
    fn predict_batch(&self, input: &Self::InputBatch) -> crate::Result<Self::OutputBatch>;
}
