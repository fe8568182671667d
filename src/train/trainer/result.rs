//! Trainer phase reports

/// What the fit phase did
#[derive(Debug, Clone)]
pub struct FitReport {
    /// Epochs actually run
    pub epochs_run: usize,
    /// Average training loss of the last epoch
    pub final_train_loss: f32,
    /// Best per-epoch average validation loss seen
    pub best_val_loss: Option<f32>,
    /// Whether early stopping ended the phase before the epoch budget
    pub stopped_early: bool,
    /// Wall-clock duration of the phase in seconds
    pub elapsed_secs: f64,
}

/// What the test phase measured
#[derive(Debug, Clone)]
pub struct TestReport {
    /// Average loss on the held-out test partition
    pub loss: f32,
    /// Name of the task metric ("accuracy", "rmse")
    pub metric_name: String,
    /// Value of the task metric
    pub metric_value: f32,
    /// Test partition size
    pub n_samples: usize,
}
