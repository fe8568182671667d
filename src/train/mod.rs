//! Training loop and its supporting machinery
//!
//! This module provides the framework layer the run orchestrator drives:
//! - Loss functions (MSE, BCE-with-logits, batched cross-entropy)
//! - Evaluation metrics (accuracy, argmax accuracy, RMSE, R²)
//! - Callback system with early stopping
//! - Best-model checkpoint policy
//! - Trainer abstraction with fit / test phases
//! - Training configuration and metrics tracking

mod batch;
mod config;

pub mod callback;
pub mod loss;
pub mod metrics;
pub mod trainer;

pub use batch::Batch;
pub use callback::{
    CallbackAction, CallbackContext, CallbackManager, CheckpointPolicy, EarlyStopping,
    TrainerCallback,
};
pub use config::{MetricsTracker, TrainConfig};
pub use loss::{BCEWithLogitsLoss, CrossEntropyLoss, LossFn, MSELoss};
pub use metrics::{Accuracy, ArgmaxAccuracy, Metric, R2Score, RMSE};
pub use trainer::{FitReport, TestReport, Trainer};
