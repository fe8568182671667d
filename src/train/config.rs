//! Training configuration and metrics tracking

/// Configuration for the training loop
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Epoch budget
    pub epochs: usize,
    /// Samples per batch
    pub batch_size: usize,
    /// Maximum global gradient norm (None disables clipping)
    pub max_grad_norm: Option<f32>,
    /// Print progress every N steps
    pub log_interval: usize,
}

impl TrainConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self {
            epochs: 10,
            batch_size: 32,
            max_grad_norm: None,
            log_interval: 10,
        }
    }

    /// Set the epoch budget
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs.max(1);
        self
    }

    /// Set the batch size
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set the progress log interval
    pub fn with_log_interval(mut self, interval: usize) -> Self {
        self.log_interval = interval.max(1);
        self
    }

    /// Enable gradient clipping at the given global norm
    pub fn with_grad_clip(mut self, max_norm: f32) -> Self {
        self.max_grad_norm = Some(max_norm);
        self
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracks losses and counters across a training run
#[derive(Debug, Clone, Default)]
pub struct MetricsTracker {
    /// Completed epochs
    pub epoch: usize,
    /// Optimizer steps taken
    pub steps: usize,
    /// Per-epoch average training loss
    pub train_losses: Vec<f32>,
    /// Per-epoch average validation loss
    pub val_losses: Vec<f32>,
    /// Learning rate at each epoch end
    pub lrs: Vec<f32>,
}

impl MetricsTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one optimizer step
    pub fn increment_step(&mut self) {
        self.steps += 1;
    }

    /// Record the end of an epoch
    pub fn record_epoch(&mut self, train_loss: f32, lr: f32) {
        self.epoch += 1;
        self.train_losses.push(train_loss);
        self.lrs.push(lr);
    }

    /// Record an epoch's average validation loss
    pub fn record_val_loss(&mut self, val_loss: f32) {
        self.val_losses.push(val_loss);
    }
}
