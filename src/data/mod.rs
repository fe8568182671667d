//! Datasets and batching
//!
//! Synthetic datasets generated deterministically from the run's seeded
//! RNG, split into train/validation/test partitions and iterated as
//! flattened batches.

pub mod synthetic;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::train::Batch;
use crate::Tensor;

/// A dataset of flattened feature rows and target rows
///
/// Features hold `n_samples * n_features` values row-major; targets hold
/// `n_samples * n_targets` values row-major (one value per sample for
/// binary and regression tasks, a one-hot row for multiclass).
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Vec<f32>,
    targets: Vec<f32>,
    n_features: usize,
    n_targets: usize,
}

impl Dataset {
    /// Create a dataset from flattened rows
    ///
    /// # Panics
    ///
    /// Panics if the row widths do not divide the data lengths or the
    /// feature and target row counts disagree.
    pub fn new(features: Vec<f32>, targets: Vec<f32>, n_features: usize, n_targets: usize) -> Self {
        assert!(n_features > 0 && n_targets > 0, "row widths must be positive");
        assert_eq!(features.len() % n_features, 0, "feature length mismatch");
        assert_eq!(targets.len() % n_targets, 0, "target length mismatch");
        assert_eq!(
            features.len() / n_features,
            targets.len() / n_targets,
            "feature and target row counts disagree"
        );
        Self {
            features,
            targets,
            n_features,
            n_targets,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.features.len() / self.n_features
    }

    /// Whether the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Width of one feature row
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Width of one target row
    pub fn n_targets(&self) -> usize {
        self.n_targets
    }

    /// Shuffle samples in place
    pub fn shuffle(&mut self, rng: &mut StdRng) {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);
        self.reorder(&order);
    }

    fn reorder(&mut self, order: &[usize]) {
        let mut features = Vec::with_capacity(self.features.len());
        let mut targets = Vec::with_capacity(self.targets.len());
        for &i in order {
            features.extend_from_slice(&self.features[i * self.n_features..(i + 1) * self.n_features]);
            targets.extend_from_slice(&self.targets[i * self.n_targets..(i + 1) * self.n_targets]);
        }
        self.features = features;
        self.targets = targets;
    }

    /// Take a contiguous sample range as a new dataset
    fn slice(&self, start: usize, end: usize) -> Dataset {
        Dataset::new(
            self.features[start * self.n_features..end * self.n_features].to_vec(),
            self.targets[start * self.n_targets..end * self.n_targets].to_vec(),
            self.n_features,
            self.n_targets,
        )
    }

    /// Iterate the dataset as batches of up to `batch_size` samples
    pub fn batches(&self, batch_size: usize) -> Vec<Batch> {
        assert!(batch_size > 0, "batch_size must be positive");
        let mut out = Vec::new();
        let mut start = 0;
        while start < self.len() {
            let end = (start + batch_size).min(self.len());
            out.push(Batch::new(
                Tensor::from_vec(
                    self.features[start * self.n_features..end * self.n_features].to_vec(),
                    false,
                ),
                Tensor::from_vec(
                    self.targets[start * self.n_targets..end * self.n_targets].to_vec(),
                    false,
                ),
            ));
            start = end;
        }
        out
    }

    /// The whole dataset as a single batch
    pub fn as_batch(&self) -> Batch {
        Batch::new(
            Tensor::from_vec(self.features.clone(), false),
            Tensor::from_vec(self.targets.clone(), false),
        )
    }
}

/// Train / validation / test partitions of one dataset
#[derive(Debug, Clone)]
pub struct DataSplits {
    pub train: Dataset,
    pub val: Dataset,
    pub test: Dataset,
}

impl DataSplits {
    /// Shuffle and split a dataset by fractions
    ///
    /// `val_fraction` and `test_fraction` are taken from the end of the
    /// shuffled data; the remainder is the training partition. Every
    /// partition keeps at least one sample.
    ///
    /// # Panics
    ///
    /// Panics if the fractions leave no training data or the dataset is
    /// too small to give every partition a sample.
    pub fn split(
        mut dataset: Dataset,
        val_fraction: f32,
        test_fraction: f32,
        rng: &mut StdRng,
    ) -> Self {
        assert!(
            val_fraction > 0.0 && test_fraction > 0.0 && val_fraction + test_fraction < 1.0,
            "split fractions must be positive and sum below 1"
        );
        let n = dataset.len();
        assert!(n >= 3, "need at least 3 samples to split");

        dataset.shuffle(rng);

        let n_val = ((n as f32 * val_fraction) as usize).max(1);
        let n_test = ((n as f32 * test_fraction) as usize).max(1);
        let n_train = n - n_val - n_test;
        assert!(n_train >= 1, "split fractions leave no training data");

        Self {
            train: dataset.slice(0, n_train),
            val: dataset.slice(n_train, n_train + n_val),
            test: dataset.slice(n_train + n_val, n),
        }
    }
}
