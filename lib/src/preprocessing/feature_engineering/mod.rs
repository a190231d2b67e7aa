//! Feature engineering transformers.
//!
//! This module provides builders that generate new features from raw inputs.

mod polynomial;

pub use polynomial::{Degree, ModelMatrixBuilder};
