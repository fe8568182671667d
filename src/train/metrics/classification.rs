//! Classification metrics
//!
//! Model outputs are continuous (logits), so thresholding and argmax are
//! part of evaluation here.

use super::Metric;
use crate::Tensor;

/// Accuracy for binary classification over logits
///
/// Predictions at or above the threshold count as the positive class;
/// targets at or above 0.5 count as positive. With raw logits the natural
/// threshold is 0.0 (sigma(x) >= 0.5 iff x >= 0).
///
/// # Example
///
/// ```
/// use lanzar::train::{Accuracy, Metric};
/// use lanzar::Tensor;
///
/// let metric = Accuracy::new(0.0);
/// let pred = Tensor::from_vec(vec![2.0, -1.0, 0.5], false);
/// let target = Tensor::from_vec(vec![1.0, 0.0, 1.0], false);
///
/// assert_eq!(metric.compute(&pred, &target), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Accuracy {
    threshold: f32,
}

impl Accuracy {
    /// Create an accuracy metric with the given decision threshold
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl Default for Accuracy {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Metric for Accuracy {
    fn compute(&self, predictions: &Tensor, targets: &Tensor) -> f32 {
        assert_eq!(
            predictions.len(),
            targets.len(),
            "Predictions and targets must have same length"
        );

        if predictions.is_empty() {
            return 0.0;
        }

        let correct = predictions
            .data()
            .iter()
            .zip(targets.data().iter())
            .filter(|&(&p, &t)| (p >= self.threshold) == (t >= 0.5))
            .count();

        correct as f32 / predictions.len() as f32
    }

    fn name(&self) -> &'static str {
        "accuracy"
    }
}

/// Accuracy for multiclass classification over batched logit rows
///
/// Each row of `num_classes` logits is reduced by argmax and compared with
/// the argmax of the matching one-hot target row.
#[derive(Debug, Clone)]
pub struct ArgmaxAccuracy {
    num_classes: usize,
}

impl ArgmaxAccuracy {
    /// Create an argmax accuracy over rows of `num_classes` values
    pub fn new(num_classes: usize) -> Self {
        assert!(num_classes >= 2, "num_classes must be at least 2");
        Self { num_classes }
    }

    fn argmax(row: &[f32]) -> usize {
        let mut best = 0;
        for (i, &v) in row.iter().enumerate() {
            if v > row[best] {
                best = i;
            }
        }
        best
    }
}

impl Metric for ArgmaxAccuracy {
    fn compute(&self, predictions: &Tensor, targets: &Tensor) -> f32 {
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

        if predictions.is_empty() {
            return 0.0;
        }

        let pred = predictions.data().as_slice().expect("contiguous predictions");
        let tgt = targets.data().as_slice().expect("contiguous targets");
        let rows = pred.len() / self.num_classes;

        let mut correct = 0;
        for r in 0..rows {
            let lo = r * self.num_classes;
            let hi = lo + self.num_classes;
            if Self::argmax(&pred[lo..hi]) == Self::argmax(&tgt[lo..hi]) {
                correct += 1;
            }
        }

        correct as f32 / rows as f32
    }

    fn name(&self) -> &'static str {
        "accuracy"
    }
}
