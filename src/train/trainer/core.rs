//! Core Trainer struct and wiring

use std::time::Instant;

use crate::device::ExecBackend;
use crate::model::Model;
use crate::optim::Optimizer;
use crate::tracking::RunLogger;
use crate::train::callback::{CallbackContext, CallbackManager, CheckpointPolicy, TrainerCallback};
use crate::train::{LossFn, MetricsTracker, TrainConfig};

/// Orchestrates the fit and test phases over one model
///
/// # Example
///
/// ```
/// use lanzar::model::{Model, TaskModel};
/// use lanzar::optim::SGD;
/// use lanzar::task::Task;
/// use lanzar::train::{EarlyStopping, TrainConfig, Trainer};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(2434);
/// let model = TaskModel::for_task(Task::Binary, 4, 3, &mut rng);
///
/// let config = TrainConfig::new().with_epochs(2).with_batch_size(8);
/// let mut trainer = Trainer::new(model, Box::new(SGD::new(0.05, 0.9)), config);
/// trainer.add_callback(EarlyStopping::new(3, 0.0001));
/// ```
pub struct Trainer<M: Model> {
    /// The model being trained
    pub(crate) model: M,

    /// Optimizer
    pub(crate) optimizer: Box<dyn Optimizer>,

    /// Loss function (supplied by the model)
    pub(crate) loss_fn: Box<dyn LossFn>,

    /// Training configuration
    pub(crate) config: TrainConfig,

    /// Execution backend (single-device or data-parallel)
    pub(crate) backend: ExecBackend,

    /// Metrics tracker
    pub metrics: MetricsTracker,

    /// Callback manager
    pub(crate) callbacks: CallbackManager,

    /// Best-model checkpoint policy
    pub(crate) checkpoint: Option<CheckpointPolicy>,

    /// Experiment logger for this run
    pub(crate) logger: Option<RunLogger>,

    /// Best monitored validation loss
    pub(crate) best_val_loss: Option<f32>,

    /// Fit phase start time
    pub(crate) start_time: Option<Instant>,
}

impl<M: Model> Trainer<M> {
    /// Create a trainer; the loss comes from the model
    pub fn new(model: M, optimizer: Box<dyn Optimizer>, config: TrainConfig) -> Self {
        let loss_fn = model.loss();
        Self {
            model,
            optimizer,
            loss_fn,
            config,
            backend: ExecBackend::SingleDevice,
            metrics: MetricsTracker::new(),
            callbacks: CallbackManager::new(),
            checkpoint: None,
            logger: None,
            best_val_loss: None,
            start_time: None,
        }
    }

    /// Set the execution backend
    pub fn set_backend(&mut self, backend: ExecBackend) {
        self.backend = backend;
    }

    /// Add a callback
    pub fn add_callback<C: TrainerCallback + 'static>(&mut self, callback: C) {
        self.callbacks.add(callback);
    }

    /// Set the checkpoint policy
    pub fn set_checkpoint(&mut self, policy: CheckpointPolicy) {
        self.checkpoint = Some(policy);
    }

    /// Bind the run logger
    pub fn set_logger(&mut self, logger: RunLogger) {
        self.logger = Some(logger);
    }

    /// Get current learning rate
    pub fn lr(&self) -> f32 {
        self.optimizer.lr()
    }

    /// Set learning rate
    pub fn set_lr(&mut self, lr: f32) {
        self.optimizer.set_lr(lr);
    }

    /// The model under training
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The execution backend in use
    pub fn backend(&self) -> &ExecBackend {
        &self.backend
    }

    /// The checkpoint policy, if one is set
    pub fn checkpoint(&self) -> Option<&CheckpointPolicy> {
        self.checkpoint.as_ref()
    }

    /// The bound run logger, if any
    pub fn logger_mut(&mut self) -> Option<&mut RunLogger> {
        self.logger.as_mut()
    }

    /// Build a callback context from current state
    pub(crate) fn build_context(
        &self,
        epoch: usize,
        loss: f32,
        val_loss: Option<f32>,
    ) -> CallbackContext {
        CallbackContext {
            epoch,
            max_epochs: self.config.epochs,
            loss,
            lr: self.lr(),
            best_loss: self.best_val_loss,
            val_loss,
            elapsed_secs: self.start_time.map_or(0.0, |t| t.elapsed().as_secs_f64()),
        }
    }
}
