//! Multiclass classification model

use rand::rngs::StdRng;

use super::{init_weights, Model};
use crate::autograd::ops::linear;
use crate::io::NamedParam;
use crate::train::{ArgmaxAccuracy, CrossEntropyLoss, LossFn, Metric};
use crate::Tensor;

/// Softmax-regression model: one logit row per sample, trained with
/// batched cross-entropy against one-hot targets
pub struct MulticlassClassifier {
    weights: Tensor,
    bias: Tensor,
    in_features: usize,
    n_classes: usize,
}

impl MulticlassClassifier {
    /// Create a classifier with seeded Gaussian-initialized weights
    pub fn new(in_features: usize, n_classes: usize, rng: &mut StdRng) -> Self {
        assert!(in_features > 0);
        assert!(n_classes >= 2, "need at least 2 classes");
        Self {
            weights: Tensor::from_vec(init_weights(n_classes * in_features, rng), true),
            bias: Tensor::zeros(n_classes, true),
            in_features,
            n_classes,
        }
    }

    /// Number of classes
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}

impl Model for MulticlassClassifier {
    fn forward(&self, inputs: &Tensor) -> Tensor {
        linear(
            inputs,
            &self.weights,
            &self.bias,
            self.in_features,
            self.n_classes,
        )
    }

    fn params(&self) -> Vec<Tensor> {
        vec![self.weights.clone(), self.bias.clone()]
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor> {
        vec![&mut self.weights, &mut self.bias]
    }

    fn snapshot(&self) -> Vec<NamedParam> {
        vec![
            NamedParam::new("weights", self.weights.data().to_vec()),
            NamedParam::new("bias", self.bias.data().to_vec()),
        ]
    }

    fn loss(&self) -> Box<dyn LossFn> {
        Box::new(CrossEntropyLoss::new(self.n_classes))
    }

    fn metric(&self) -> Box<dyn Metric> {
        Box::new(ArgmaxAccuracy::new(self.n_classes))
    }

    fn input_dim(&self) -> usize {
        self.in_features
    }

    fn target_dim(&self) -> usize {
        self.n_classes
    }

    fn name(&self) -> &'static str {
        "multiclass"
    }
}
