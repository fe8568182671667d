//! Loss function trait

use crate::Tensor;

/// Trait for loss functions
pub trait LossFn {
    /// Compute loss given predictions and targets
    ///
    /// Returns a scalar loss tensor whose tape, when walked, accumulates
    /// gradients into the predictions and onward into the model parameters.
    fn forward(&self, predictions: &Tensor, targets: &Tensor) -> Tensor;

    /// Name of the loss function
    fn name(&self) -> &str;
}
