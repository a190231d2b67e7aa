//! Scaling transformers for feature normalization.
//!
//! | Transformer | Description |
//! |-------------|-------------|
//! | [`CenterScaler`] | Subtract the training mean, divide by the training range |

pub mod center;

pub use center::{CenterScaler, FittedCenterScaler};
