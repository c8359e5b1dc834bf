//! Per-feature standardization of letter attributes.
//!
//! The scaler is fit on the training set only and then applied to both the
//! training and test sets, so test statistics never leak into training.

use crate::data_handling::Letter;
use crate::network::ATTRIBUTE_COUNT;

/// Per-feature mean/std standard scaler.
#[derive(Clone, Debug)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Scaler {
    /// Minimum stddev to avoid division by zero when transforming.
    const MIN_STD: f64 = 1e-6;
}

/// Fits a `Scaler` over the attribute columns of a dataset.
pub fn fit_scaler(letters: &[Letter]) -> Scaler {
    assert!(!letters.is_empty(), "fit_scaler requires a non-empty dataset");

    let n = letters.len() as f64;
    let mut mean = vec![0.0f64; ATTRIBUTE_COUNT];
    for letter in letters {
        for (c, value) in letter.attributes().iter().enumerate() {
            mean[c] += value;
        }
    }
    for v in mean.iter_mut() {
        *v /= n;
    }

    let mut std = vec![0.0f64; ATTRIBUTE_COUNT];
    for letter in letters {
        for (c, value) in letter.attributes().iter().enumerate() {
            let d = value - mean[c];
            std[c] += d * d;
        }
    }
    for v in std.iter_mut() {
        *v = (*v / n).sqrt().max(Scaler::MIN_STD);
    }

    Scaler { mean, std }
}

/// Standardizes every letter's attributes in place using a fitted `Scaler`.
pub fn transform_all(letters: &mut [Letter], scaler: &Scaler) {
    for letter in letters.iter_mut() {
        let attributes = letter.attributes_mut();
        for c in 0..ATTRIBUTE_COUNT {
            attributes[c] = (attributes[c] - scaler.mean[c]) / scaler.std[c];
        }
    }
}
