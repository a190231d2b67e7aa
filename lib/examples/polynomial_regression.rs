//! Polynomial Regression Example: every estimator on one dataset
//!
//! This example demonstrates:
//! - Building train/test splits from raw feature sequences
//! - Loading regressor hyperparameters from JSON
//! - Fitting all six regressor kinds with and without `fit_intercept`
//! - Scoring train and test predictions
//!
//! The target is a noisy cubic in two features:
//! `y = 1 + 2a - 3b + a*b - 0.5*a^3 + noise`
//!
//! Run with: cargo run --example polynomial_regression

use polyreg::{
    dataset::DataSplit,
    metrics::{mse, r_squared},
    regressor::{Regressor, RegressorParams, RegressorType},
};
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use std::error::Error;

const N_TRAIN: usize = 160;
const N_TEST: usize = 40;
const DEGREE: usize = 3;

fn make_split<R: Rng>(n: usize, rng: &mut R) -> Result<DataSplit, Box<dyn Error>> {
    let noise = Normal::new(0.0, 0.1)?;
    let a: Vec<f64> = (0..n).map(|_| rng.random_range(-2.0..2.0)).collect();
    let b: Vec<f64> = (0..n).map(|_| rng.random_range(-1.0..1.0)).collect();
    let y: Vec<f64> = a
        .iter()
        .zip(&b)
        .map(|(&a, &b)| 1.0 + 2.0 * a - 3.0 * b + a * b - 0.5 * a.powi(3) + rng.sample(noise))
        .collect();
    Ok(DataSplit::new(vec![a, b], y)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Polynomial Regression ===\n");

    // 1. Synthetic data from a seeded stream
    let mut rng = rand::rngs::StdRng::seed_from_u64(2024);
    let train = make_split(N_TRAIN, &mut rng)?;
    let test = make_split(N_TEST, &mut rng)?;
    println!(
        "Train: {} samples, test: {} samples, {} features, degree {}\n",
        train.n_samples(),
        test.n_samples(),
        train.n_features(),
        DEGREE
    );

    // 2. Hyperparameters as they would arrive from a config file
    let params = RegressorParams::from_json(
        r#"{
            "learning_rate": 0.05,
            "max_iterations": 4000,
            "momentum": 0.9,
            "batch_size": 32,
            "alpha": 0.001
        }"#,
    )?;

    // 3. Every kind, with and without centering
    println!(
        "{:<10} {:<14} {:>12} {:>12} {:>10}",
        "kind", "fit_intercept", "train MSE", "test MSE", "test R²"
    );
    for fit_intercept in [false, true] {
        let params = params.clone().with_fit_intercept(fit_intercept);
        for kind in RegressorType::ALL {
            let regressor = Regressor::new(kind, &params);
            let predictions = regressor.fit_predict(&train, &test, DEGREE, &mut rng)?;

            println!(
                "{:<10} {:<14} {:>12.5} {:>12.5} {:>10.4}",
                kind.to_string(),
                fit_intercept,
                mse(train.targets().view(), predictions.train.view())?,
                mse(test.targets().view(), predictions.test.view())?,
                r_squared(test.targets().view(), predictions.test.view())?,
            );
        }
    }

    // 4. A fitted regressor can be reused on new inputs
    let fitted = Regressor::new(RegressorType::Ridge, &params.with_fit_intercept(true))
        .fit(&train, DEGREE, &mut rng)?;
    let point = vec![vec![1.0], vec![-0.5]];
    let prediction = fitted.predict(&point)?;
    println!(
        "\nRidge prediction at (a=1, b=-0.5): {:.4} (noise-free target {:.4})",
        prediction[0],
        1.0 + 2.0 + 1.5 - 0.5 - 0.5
    );
    println!("Ridge coefficients: {}", fitted.coefficients());

    println!("\nLogistic rows report logits fitted to real-valued targets; compare with care.");
    Ok(())
}
