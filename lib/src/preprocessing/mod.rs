//! Feature preprocessing for the regressors.
//!
//! # Core Traits
//!
//! - [`Transformer`]: Unfitted transformer that learns from training data
//! - [`FittedTransformer`]: Fitted transformer replayed on unseen data
//!
//! # Available Components
//!
//! - [`ModelMatrixBuilder`]: Polynomial design matrix from raw feature sequences
//! - [`CenterScaler`]: Mean/range centering with a replayable fitted state
//!
//! # Example
//!
//! ```
//! use polyreg::preprocessing::{CenterScaler, FittedTransformer, ModelMatrixBuilder, Transformer};
//!
//! let builder = ModelMatrixBuilder::new().with_degree(2).with_intercept(false);
//! let train = builder.build(&[vec![0.0, 1.0, 2.0, 3.0]]).unwrap();
//! let test = builder.build(&[vec![4.0]]).unwrap();
//!
//! let (scaler, _scaled_train) = CenterScaler::new().fit_transform(&train).unwrap();
//! let scaled_test = scaler.transform(&test).unwrap();
//! assert_eq!(scaled_test.dim(), (1, 2));
//! ```

pub mod feature_engineering;
pub mod scaling;
pub mod traits;

pub use feature_engineering::{Degree, ModelMatrixBuilder};
pub use scaling::{CenterScaler, FittedCenterScaler};
pub use traits::{FittedTransformer, Transformer};
