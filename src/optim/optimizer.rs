//! Optimizer trait

use crate::Tensor;

/// Trait for optimization algorithms
pub trait Optimizer {
    /// Perform a single optimization step on owned parameters
    fn step(&mut self, params: &mut [Tensor]);

    /// Perform an optimization step on referenced parameters
    ///
    /// This is the path the trainer uses: parameters are borrowed from the
    /// model, which keeps ownership of its tensors across epochs.
    fn step_refs(&mut self, params: &mut [&mut Tensor]);

    /// Zero out all gradients
    fn zero_grad(&mut self, params: &mut [Tensor]) {
        for param in params {
            param.zero_grad();
        }
    }

    /// Zero gradients on referenced parameters
    fn zero_grad_refs(&mut self, params: &mut [&mut Tensor]) {
        for param in params.iter_mut() {
            param.zero_grad();
        }
    }

    /// Get learning rate
    fn lr(&self) -> f32;

    /// Set learning rate
    fn set_lr(&mut self, lr: f32);
}
