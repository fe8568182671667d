//! Mean Squared Error loss

use std::rc::Rc;

use ndarray::Array1;

use super::LossFn;
use crate::autograd::BackwardOp;
use crate::Tensor;

/// Mean Squared Error Loss
///
/// L = mean((predictions - targets)^2)
///
/// # Example
///
/// ```
/// use lanzar::train::{LossFn, MSELoss};
/// use lanzar::Tensor;
///
/// let loss_fn = MSELoss;
/// let pred = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
/// let target = Tensor::from_vec(vec![1.5, 2.5, 3.5], false);
///
/// let loss = loss_fn.forward(&pred, &target);
/// assert!((loss.data()[0] - 0.25).abs() < 1e-5);
/// ```
pub struct MSELoss;

struct MseBackward {
    predictions: Tensor,
    grad: Array1<f32>,
}

impl BackwardOp for MseBackward {
    fn backward(&self) {
        self.predictions.accumulate_grad(self.grad.clone());
        if let Some(op) = self.predictions.backward_op() {
            op.backward();
        }
    }
}

impl LossFn for MSELoss {
    fn forward(&self, predictions: &Tensor, targets: &Tensor) -> Tensor {
        assert_eq!(
            predictions.len(),
            targets.len(),
            "Predictions and targets must have same length"
        );

        let diff = predictions.data() - targets.data();
        let squared = &diff * &diff;
        let mse = squared.mean().unwrap_or(0.0);

        let mut loss = Tensor::from_vec(vec![mse], true);

        // d(MSE)/d(pred) = 2 * (pred - target) / n
        let n = predictions.len() as f32;
        let grad = &diff * (2.0 / n);

        if predictions.requires_grad() {
            loss.set_backward_op(Rc::new(MseBackward {
                predictions: predictions.clone(),
                grad,
            }));
        }

        loss
    }

    fn name(&self) -> &'static str {
        "MSE"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mse_loss_basic() {
        let loss_fn = MSELoss;
        let pred = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
        let target = Tensor::from_vec(vec![1.5, 2.5, 3.5], false);

        let loss = loss_fn.forward(&pred, &target);

        // MSE = mean((0.5, 0.5, 0.5)^2) = 0.25
        assert_relative_eq!(loss.data()[0], 0.25, epsilon = 1e-5);
    }

    #[test]
    fn test_mse_loss_zero_for_perfect() {
        let loss_fn = MSELoss;
        let pred = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
        let target = Tensor::from_vec(vec![1.0, 2.0, 3.0], false);

        let loss = loss_fn.forward(&pred, &target);

        assert_relative_eq!(loss.data()[0], 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_mse_gradient() {
        let loss_fn = MSELoss;
        let pred = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
        let target = Tensor::from_vec(vec![0.0, 0.0, 0.0], false);

        let loss = loss_fn.forward(&pred, &target);
        loss.backward();

        // d(MSE)/d(pred) = 2*(pred - target)/n
        let grad = pred.grad().unwrap();
        assert_relative_eq!(grad[0], 2.0 / 3.0, epsilon = 1e-5);
        assert_relative_eq!(grad[1], 4.0 / 3.0, epsilon = 1e-5);
        assert_relative_eq!(grad[2], 6.0 / 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_mse_gradient_reaches_model_params() {
        use crate::autograd::ops::linear;

        // y = w * x, loss = (y - t)^2; dL/dw = 2 (wx - t) x
        let x = Tensor::from_vec(vec![2.0], false);
        let w = Tensor::from_vec(vec![1.0], true);
        let b = Tensor::from_vec(vec![0.0], true);

        let pred = linear(&x, &w, &b, 1, 1);
        let target = Tensor::from_vec(vec![5.0], false);
        let loss = MSELoss.forward(&pred, &target);
        loss.backward();

        // pred = 2, dL/dpred = 2*(2-5) = -6, dL/dw = -6 * 2 = -12
        assert_relative_eq!(w.grad().unwrap()[0], -12.0, epsilon = 1e-4);
        assert_relative_eq!(b.grad().unwrap()[0], -6.0, epsilon = 1e-4);
    }

    #[test]
    #[should_panic(expected = "must have same length")]
    fn test_mse_mismatched_lengths() {
        let loss_fn = MSELoss;
        let pred = Tensor::from_vec(vec![1.0, 2.0], true);
        let target = Tensor::from_vec(vec![1.0, 2.0, 3.0], false);

        loss_fn.forward(&pred, &target);
    }

    #[test]
    fn test_mse_no_grad() {
        let loss_fn = MSELoss;
        let pred = Tensor::from_vec(vec![1.0, 2.0], false);
        let target = Tensor::from_vec(vec![1.5, 2.5], false);
        let loss = loss_fn.forward(&pred, &target);
        assert!(loss.data()[0] > 0.0);
        assert!(loss.backward_op().is_none());
    }

    #[test]
    fn test_gradient_accumulation_mse() {
        let pred = Tensor::from_vec(vec![1.0, 2.0], true);
        let target = Tensor::from_vec(vec![0.0, 0.0], false);

        let first = MSELoss.forward(&pred, &target);
        first.backward();
        let after_one = pred.grad().unwrap();

        let second = MSELoss.forward(&pred, &target);
        second.backward();
        let after_two = pred.grad().unwrap();

        // Gradients accumulate across backward passes
        assert_relative_eq!(after_two[0], 2.0 * after_one[0], epsilon = 1e-5);
    }
}
