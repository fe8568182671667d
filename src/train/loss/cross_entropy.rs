//! Cross-entropy loss for multiclass classification
//!
//! Operates on batched rows: predictions hold `batch * num_classes` logits
//! row-major, targets hold the matching one-hot rows. Softmax is computed
//! per row.

use std::rc::Rc;

use ndarray::Array1;

use super::LossFn;
use crate::autograd::BackwardOp;
use crate::Tensor;

/// Batched cross-entropy loss
///
/// L = mean over rows of -sum(target_row * log(softmax(logit_row)))
///
/// # Example
///
/// ```
/// use lanzar::train::{CrossEntropyLoss, LossFn};
/// use lanzar::Tensor;
///
/// let loss_fn = CrossEntropyLoss::new(3);
/// let logits = Tensor::from_vec(vec![2.0, 1.0, 0.5], true);
/// let targets = Tensor::from_vec(vec![1.0, 0.0, 0.0], false); // one-hot
///
/// let loss = loss_fn.forward(&logits, &targets);
/// assert!(loss.data()[0] > 0.0);
/// ```
pub struct CrossEntropyLoss {
    num_classes: usize,
}

impl CrossEntropyLoss {
    /// Create a cross-entropy loss over rows of `num_classes` logits
    pub fn new(num_classes: usize) -> Self {
        assert!(num_classes >= 2, "num_classes must be at least 2");
        Self { num_classes }
    }

    /// Softmax over one row of logits
    pub(crate) fn softmax_row(row: &[f32]) -> Vec<f32> {
        let max = row.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        let exp: Vec<f32> = row.iter().map(|&v| (v - max).exp()).collect();
        let sum: f32 = exp.iter().sum();
        exp.into_iter().map(|e| e / sum).collect()
    }
}

struct CeBackward {
    predictions: Tensor,
    grad: Array1<f32>,
}

impl BackwardOp for CeBackward {
    fn backward(&self) {
        self.predictions.accumulate_grad(self.grad.clone());
        if let Some(op) = self.predictions.backward_op() {
            op.backward();
        }
    }
}

impl LossFn for CrossEntropyLoss {
    fn forward(&self, predictions: &Tensor, targets: &Tensor) -> Tensor {
        assert_eq!(
            predictions.len(),
            targets.len(),
            "Predictions and targets must have same length"
        );
        assert_eq!(
            predictions.len() % self.num_classes,
            0,
            "prediction length must be a multiple of num_classes"
        );

        let rows = predictions.len() / self.num_classes;
        let pred = predictions.data().as_slice().expect("contiguous predictions");
        let tgt = targets.data().as_slice().expect("contiguous targets");

        let mut total = 0.0f32;
        let mut grad = Array1::zeros(predictions.len());

        for r in 0..rows {
            let lo = r * self.num_classes;
            let hi = lo + self.num_classes;
            let probs = Self::softmax_row(&pred[lo..hi]);

            for (c, &p) in probs.iter().enumerate() {
                let t = tgt[lo + c];
                total += -t * (p + 1e-10).max(f32::MIN_POSITIVE).ln();
                // d(CE)/d(logit) = probs - targets, averaged over rows
                grad[lo + c] = (p - t) / rows as f32;
            }
        }

        let mean = total / rows as f32;
        let mut loss = Tensor::from_vec(vec![mean], true);

        if predictions.requires_grad() {
            loss.set_backward_op(Rc::new(CeBackward {
                predictions: predictions.clone(),
                grad,
            }));
        }

        loss
    }

    fn name(&self) -> &'static str {
        "CrossEntropy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cross_entropy_single_row() {
        let loss_fn = CrossEntropyLoss::new(3);
        let logits = Tensor::from_vec(vec![2.0, 1.0, 0.5], true);
        let targets = Tensor::from_vec(vec![1.0, 0.0, 0.0], false);

        let loss = loss_fn.forward(&logits, &targets);
        assert!(loss.data()[0] > 0.0);
        assert!(loss.data()[0].is_finite());
    }

    #[test]
    fn test_softmax_row_sums_to_one() {
        let probs = CrossEntropyLoss::softmax_row(&[1.0, 2.0, 3.0]);
        let sum: f32 = probs.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
        for &p in &probs {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_softmax_row_numerical_stability() {
        let probs = CrossEntropyLoss::softmax_row(&[1000.0, 1001.0, 1002.0]);
        let sum: f32 = probs.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
        for &p in &probs {
            assert!(p.is_finite());
        }
    }

    #[test]
    fn test_cross_entropy_uniform_equals_ln_c() {
        // Equal logits -> uniform softmax -> CE = ln(C)
        for &nc in &[2usize, 3, 5, 10] {
            let loss_fn = CrossEntropyLoss::new(nc);
            let logits = Tensor::from_vec(vec![1.0; nc], false);
            let mut target = vec![0.0; nc];
            target[0] = 1.0;
            let targets = Tensor::from_vec(target, false);

            let loss = loss_fn.forward(&logits, &targets);
            assert_relative_eq!(loss.data()[0], (nc as f32).ln(), epsilon = 1e-4);
        }
    }

    #[test]
    fn test_cross_entropy_perfect_prediction_near_zero() {
        let loss_fn = CrossEntropyLoss::new(3);
        let logits = Tensor::from_vec(vec![50.0, -50.0, -50.0], false);
        let targets = Tensor::from_vec(vec![1.0, 0.0, 0.0], false);

        let loss = loss_fn.forward(&logits, &targets);
        assert!(loss.data()[0] < 1e-3);
    }

    #[test]
    fn test_cross_entropy_batched_rows() {
        // Two rows of three classes; per-row softmax, mean over rows
        let loss_fn = CrossEntropyLoss::new(3);
        let logits = Tensor::from_vec(vec![1.0, 1.0, 1.0, 1.0, 1.0, 1.0], false);
        let targets = Tensor::from_vec(vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0], false);

        let loss = loss_fn.forward(&logits, &targets);
        // Each row contributes ln(3); mean is ln(3)
        assert_relative_eq!(loss.data()[0], 3.0_f32.ln(), epsilon = 1e-4);
    }

    #[test]
    fn test_cross_entropy_gradient() {
        let loss_fn = CrossEntropyLoss::new(3);
        let logits = Tensor::from_vec(vec![2.0, 1.0, 0.5], true);
        let targets = Tensor::from_vec(vec![1.0, 0.0, 0.0], false);

        let loss = loss_fn.forward(&logits, &targets);
        loss.backward();

        let grad = logits.grad().unwrap();
        for g in &grad {
            assert!(g.is_finite());
        }
        // grad = probs - target; the true class gradient is negative
        assert!(grad[0] < 0.0);
        assert!(grad[1] > 0.0);
        // Gradient rows sum to zero (softmax property)
        let sum: f32 = grad.iter().sum();
        assert_relative_eq!(sum, 0.0, epsilon = 1e-5);
    }

    #[test]
    #[should_panic(expected = "multiple of num_classes")]
    fn test_cross_entropy_bad_row_width() {
        let loss_fn = CrossEntropyLoss::new(3);
        let logits = Tensor::from_vec(vec![1.0, 2.0], true);
        let targets = Tensor::from_vec(vec![1.0, 0.0], false);
        loss_fn.forward(&logits, &targets);
    }

    #[test]
    #[should_panic(expected = "at least 2")]
    fn test_cross_entropy_rejects_single_class() {
        CrossEntropyLoss::new(1);
    }
}
