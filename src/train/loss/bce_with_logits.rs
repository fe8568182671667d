//! Binary cross-entropy with logits
//!
//! Combines the sigmoid activation with binary cross-entropy in one
//! numerically stable expression:
//!
//! ```text
//! L_i = max(x_i, 0) - x_i * t_i + log(1 + exp(-|x_i|))
//! L = mean(L_i)
//! ```
//!
//! Gradient: `dL/dx_i = (sigma(x_i) - t_i) / N`

use std::rc::Rc;

use ndarray::Array1;

use super::LossFn;
use crate::autograd::BackwardOp;
use crate::Tensor;

/// Binary cross-entropy with logits
///
/// Predictions are raw logits, one per sample; targets are 0.0 or 1.0.
///
/// # Example
///
/// ```
/// use lanzar::train::{BCEWithLogitsLoss, LossFn};
/// use lanzar::Tensor;
///
/// let loss_fn = BCEWithLogitsLoss;
/// let logits = Tensor::from_vec(vec![2.0, -1.0, 0.5], true);
/// let targets = Tensor::from_vec(vec![1.0, 0.0, 1.0], false);
///
/// let loss = loss_fn.forward(&logits, &targets);
/// assert!(loss.data()[0] > 0.0);
/// ```
pub struct BCEWithLogitsLoss;

impl BCEWithLogitsLoss {
    /// Element-wise numerically stable sigmoid
    pub(crate) fn sigmoid(x: &Array1<f32>) -> Array1<f32> {
        x.mapv(|v| {
            if v >= 0.0 {
                1.0 / (1.0 + (-v).exp())
            } else {
                let exp_v = v.exp();
                exp_v / (1.0 + exp_v)
            }
        })
    }

    /// Stable BCE: max(x, 0) - x*t + log(1 + exp(-|x|))
    fn stable_bce(logit: f32, target: f32) -> f32 {
        let relu = logit.max(0.0);
        let abs_x = logit.abs();
        relu - logit * target + (1.0 + (-abs_x).exp()).ln()
    }
}

struct BceBackward {
    predictions: Tensor,
    grad: Array1<f32>,
}

impl BackwardOp for BceBackward {
    fn backward(&self) {
        self.predictions.accumulate_grad(self.grad.clone());
        if let Some(op) = self.predictions.backward_op() {
            op.backward();
        }
    }
}

impl LossFn for BCEWithLogitsLoss {
    fn forward(&self, predictions: &Tensor, targets: &Tensor) -> Tensor {
        assert_eq!(
            predictions.len(),
            targets.len(),
            "Predictions and targets must have same length"
        );

        let n = predictions.len() as f32;
        let total: f32 = predictions
            .data()
            .iter()
            .zip(targets.data().iter())
            .map(|(&logit, &target)| Self::stable_bce(logit, target))
            .sum::<f32>()
            / n;

        let mut loss = Tensor::from_vec(vec![total], true);

        let sigmoid_vals = Self::sigmoid(predictions.data());
        let grad = (&sigmoid_vals - targets.data()) / n;

        if predictions.requires_grad() {
            loss.set_backward_op(Rc::new(BceBackward {
                predictions: predictions.clone(),
                grad,
            }));
        }

        loss
    }

    fn name(&self) -> &'static str {
        "BCEWithLogits"
    }
}
