//! Early stopping callback

use super::traits::{CallbackAction, CallbackContext, TrainerCallback};

/// Early stopping on the average validation loss
///
/// Monitors the per-epoch average validation loss (falling back to the
/// training loss when no validation ran) and stops training once the
/// monitored value has not improved for `patience` consecutive epochs.
/// The metric is minimized; non-verbose by default.
///
/// # Example
///
/// ```
/// use lanzar::train::EarlyStopping;
///
/// // Stop after 5 epochs without at least 0.001 improvement
/// let early_stop = EarlyStopping::new(5, 0.001);
/// ```
#[derive(Clone, Debug)]
pub struct EarlyStopping {
    /// Number of epochs to wait for improvement
    patience: usize,
    /// Minimum improvement to reset patience
    min_delta: f32,
    /// Best monitored loss seen so far
    best_loss: f32,
    /// Epochs without improvement
    pub(crate) epochs_without_improvement: usize,
    /// Announce the stop on stderr
    verbose: bool,
}

impl EarlyStopping {
    /// Create a new early stopping callback
    pub fn new(patience: usize, min_delta: f32) -> Self {
        Self {
            patience: patience.max(1),
            min_delta,
            best_loss: f32::INFINITY,
            epochs_without_improvement: 0,
            verbose: false,
        }
    }

    /// Announce the stop on stderr
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Reset internal state
    pub fn reset(&mut self) {
        self.best_loss = f32::INFINITY;
        self.epochs_without_improvement = 0;
    }

    /// Best monitored loss seen so far
    pub fn best_loss(&self) -> f32 {
        self.best_loss
    }

    fn check_improvement(&mut self, loss: f32) -> bool {
        if loss < self.best_loss - self.min_delta {
            self.best_loss = loss;
            self.epochs_without_improvement = 0;
            true
        } else {
            self.epochs_without_improvement += 1;
            false
        }
    }
}

impl TrainerCallback for EarlyStopping {
    fn on_epoch_end(&mut self, ctx: &CallbackContext) -> CallbackAction {
        let monitored = ctx.val_loss.unwrap_or(ctx.loss);
        self.check_improvement(monitored);

        if self.epochs_without_improvement >= self.patience {
            if self.verbose {
                eprintln!(
                    "Early stopping: no improvement for {} epochs (best loss: {:.4})",
                    self.patience, self.best_loss
                );
            }
            CallbackAction::Stop
        } else {
            CallbackAction::Continue
        }
    }

    fn name(&self) -> &'static str {
        "EarlyStopping"
    }
}
