//! Synthetic dataset generators
//!
//! Deterministic given the RNG: classification tasks draw Gaussian blobs
//! (one per class), regression draws a noisy linear map. All generators
//! take the caller's seeded `StdRng`, so identical run configurations
//! produce identical data.

use std::f32::consts::PI;

use rand::rngs::StdRng;
use rand::Rng;

use super::Dataset;

/// Sample one standard Gaussian value (Box-Muller transform)
pub(crate) fn gaussian(rng: &mut StdRng) -> f32 {
    let u1: f32 = rng.random::<f32>().max(1e-10);
    let u2: f32 = rng.random::<f32>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Two Gaussian blobs with 0/1 targets
///
/// Class 0 is centered at `-1` in every dimension, class 1 at `+1`;
/// classes alternate sample by sample, so any contiguous split keeps both
/// represented.
pub fn binary_blobs(n_samples: usize, n_features: usize, rng: &mut StdRng) -> Dataset {
    assert!(n_samples > 0 && n_features > 0);

    let mut features = Vec::with_capacity(n_samples * n_features);
    let mut targets = Vec::with_capacity(n_samples);

    for i in 0..n_samples {
        let class = i % 2;
        let center = if class == 0 { -1.0 } else { 1.0 };
        for _ in 0..n_features {
            features.push(center + 0.5 * gaussian(rng));
        }
        targets.push(class as f32);
    }

    Dataset::new(features, targets, n_features, 1)
}

/// `n_classes` Gaussian blobs with one-hot targets
///
/// Class `c` is centered at `2c` in every dimension; classes cycle sample
/// by sample.
pub fn multiclass_blobs(
    n_samples: usize,
    n_features: usize,
    n_classes: usize,
    rng: &mut StdRng,
) -> Dataset {
    assert!(n_samples > 0 && n_features > 0);
    assert!(n_classes >= 2, "need at least 2 classes");

    let mut features = Vec::with_capacity(n_samples * n_features);
    let mut targets = Vec::with_capacity(n_samples * n_classes);

    for i in 0..n_samples {
        let class = i % n_classes;
        let center = 2.0 * class as f32;
        for _ in 0..n_features {
            features.push(center + 0.5 * gaussian(rng));
        }
        for c in 0..n_classes {
            targets.push(if c == class { 1.0 } else { 0.0 });
        }
    }

    Dataset::new(features, targets, n_features, n_classes)
}

/// Noisy linear map: `y = w . x + b + noise`
///
/// The ground-truth weights alternate sign with magnitude decreasing by
/// position; inputs are standard Gaussian and noise has standard deviation
/// `noise_std`.
pub fn linear_regression(
    n_samples: usize,
    n_features: usize,
    noise_std: f32,
    rng: &mut StdRng,
) -> Dataset {
    assert!(n_samples > 0 && n_features > 0);

    let true_w: Vec<f32> = (0..n_features)
        .map(|j| {
            let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
            sign * (1.0 / (1.0 + j as f32))
        })
        .collect();
    let true_b = 0.5;

    let mut features = Vec::with_capacity(n_samples * n_features);
    let mut targets = Vec::with_capacity(n_samples);

    for _ in 0..n_samples {
        let x: Vec<f32> = (0..n_features).map(|_| gaussian(rng)).collect();
        let y: f32 = x.iter().zip(true_w.iter()).map(|(xi, wi)| xi * wi).sum::<f32>()
            + true_b
            + noise_std * gaussian(rng);
        features.extend_from_slice(&x);
        targets.push(y);
    }

    Dataset::new(features, targets, n_features, 1)
}
