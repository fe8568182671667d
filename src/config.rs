//! Run configuration
//!
//! One immutable record per invocation. Built from CLI arguments, validated
//! once, then read-only for the rest of the run. Every field is logged as a
//! hyperparameter before training starts, so a run's configuration is
//! recoverable from its log artifacts.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::Task;

/// Fixed default random seed
///
/// Set before any stochastic component (dataset, model init) is
/// constructed; identical configurations therefore produce identical
/// initial parameters.
pub const DEFAULT_SEED: u64 = 2434;

/// Immutable configuration of one training run
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    /// Which prediction task to train
    pub task: Task,
    /// Number of devices; 1 selects single-device execution, more selects
    /// the data-parallel backend
    pub devices: usize,
    /// Epoch budget
    pub epochs: usize,
    /// Early-stopping patience (epochs without validation improvement)
    pub patience: usize,
    /// Log/checkpoint directory
    pub logdir: PathBuf,
    /// Random seed
    pub seed: u64,
    /// Learning rate
    pub lr: f32,
    /// Samples per batch
    pub batch_size: usize,
    /// Synthetic dataset size
    pub samples: usize,
    /// Features per sample
    pub features: usize,
    /// Class count (multiclass task only)
    pub classes: usize,
    /// Fraction of samples held out for validation
    pub val_fraction: f32,
    /// Fraction of samples held out for the test phase
    pub test_fraction: f32,
}

impl RunConfig {
    /// Create a configuration with defaults for everything but the task
    /// and log directory
    pub fn new(task: Task, logdir: impl Into<PathBuf>) -> Self {
        Self {
            task,
            devices: 1,
            epochs: 10,
            patience: 3,
            logdir: logdir.into(),
            seed: DEFAULT_SEED,
            lr: 0.05,
            batch_size: 32,
            samples: 512,
            features: 8,
            classes: 3,
            val_fraction: 0.2,
            test_fraction: 0.2,
        }
    }

    /// Check every field is usable; called once before the run starts
    pub fn validate(&self) -> Result<()> {
        if self.devices < 1 {
            return Err(Error::Config("devices must be at least 1".into()));
        }
        if self.epochs < 1 {
            return Err(Error::Config("epochs must be at least 1".into()));
        }
        if self.patience < 1 {
            return Err(Error::Config("patience must be at least 1".into()));
        }
        if !(self.lr > 0.0) {
            return Err(Error::Config("lr must be positive".into()));
        }
        if self.batch_size < 1 {
            return Err(Error::Config("batch-size must be at least 1".into()));
        }
        if self.samples < 8 {
            return Err(Error::Config("samples must be at least 8".into()));
        }
        if self.features < 1 {
            return Err(Error::Config("features must be at least 1".into()));
        }
        if self.classes < 2 {
            return Err(Error::Config("classes must be at least 2".into()));
        }
        if !(self.val_fraction > 0.0
            && self.test_fraction > 0.0
            && self.val_fraction + self.test_fraction < 1.0)
        {
            return Err(Error::Config(
                "val/test fractions must be positive and sum below 1".into(),
            ));
        }
        Ok(())
    }

    /// Every field as string-encoded hyperparameters for the run logger
    pub fn to_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("task".into(), self.task.to_string());
        params.insert("devices".into(), self.devices.to_string());
        params.insert("epochs".into(), self.epochs.to_string());
        params.insert("patience".into(), self.patience.to_string());
        params.insert("logdir".into(), self.logdir.display().to_string());
        params.insert("seed".into(), self.seed.to_string());
        params.insert("lr".into(), self.lr.to_string());
        params.insert("batch_size".into(), self.batch_size.to_string());
        params.insert("samples".into(), self.samples.to_string());
        params.insert("features".into(), self.features.to_string());
        params.insert("classes".into(), self.classes.to_string());
        params.insert("val_fraction".into(), self.val_fraction.to_string());
        params.insert("test_fraction".into(), self.test_fraction.to_string());
        params
    }
}
