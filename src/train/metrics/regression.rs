//! Regression metrics: RMSE and R²

use super::Metric;
use crate::Tensor;

/// Root Mean Squared Error
///
/// RMSE = sqrt(mean((y - y_pred)^2)). Lower is better.
///
/// # Example
///
/// ```
/// use lanzar::train::{Metric, RMSE};
/// use lanzar::Tensor;
///
/// let metric = RMSE;
/// let pred = Tensor::from_vec(vec![1.0, 2.0, 3.0], false);
/// let target = Tensor::from_vec(vec![1.0, 2.0, 3.0], false);
///
/// assert!(metric.compute(&pred, &target) < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RMSE;

impl Metric for RMSE {
    fn compute(&self, predictions: &Tensor, targets: &Tensor) -> f32 {
        assert_eq!(predictions.len(), targets.len());

        if predictions.is_empty() {
            return 0.0;
        }

        let mse: f32 = predictions
            .data()
            .iter()
            .zip(targets.data().iter())
            .map(|(&p, &t)| (p - t) * (p - t))
            .sum::<f32>()
            / predictions.len() as f32;
        mse.sqrt()
    }

    fn name(&self) -> &'static str {
        "rmse"
    }

    fn higher_is_better(&self) -> bool {
        false
    }
}

/// R² (coefficient of determination)
///
/// R² = 1 - SS_res / SS_tot. 1.0 is perfect prediction, 0.0 matches
/// predicting the target mean. Constant targets with perfect prediction
/// score 1.0; constant targets with any residual score 0.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct R2Score;

impl Metric for R2Score {
    fn compute(&self, predictions: &Tensor, targets: &Tensor) -> f32 {
        assert_eq!(predictions.len(), targets.len());

        if predictions.is_empty() {
            return 0.0;
        }

        let mean = targets.data().mean().unwrap_or(0.0);
        let ss_res: f32 = predictions
            .data()
            .iter()
            .zip(targets.data().iter())
            .map(|(&p, &t)| (t - p) * (t - p))
            .sum();
        let ss_tot: f32 = targets.data().iter().map(|&t| (t - mean) * (t - mean)).sum();

        if ss_tot == 0.0 {
            return if ss_res == 0.0 { 1.0 } else { 0.0 };
        }

        1.0 - ss_res / ss_tot
    }

    fn name(&self) -> &'static str {
        "r2"
    }
}
