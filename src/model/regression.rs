//! Regression model

use rand::rngs::StdRng;

use super::{init_weights, Model};
use crate::autograd::ops::linear;
use crate::io::NamedParam;
use crate::train::{LossFn, Metric, MSELoss, RMSE};
use crate::Tensor;

/// Linear regression model: one value per sample, trained with MSE
pub struct Regressor {
    weights: Tensor,
    bias: Tensor,
    in_features: usize,
}

impl Regressor {
    /// Create a regressor with seeded Gaussian-initialized weights
    pub fn new(in_features: usize, rng: &mut StdRng) -> Self {
        assert!(in_features > 0);
        Self {
            weights: Tensor::from_vec(init_weights(in_features, rng), true),
            bias: Tensor::zeros(1, true),
            in_features,
        }
    }
}

impl Model for Regressor {
    fn forward(&self, inputs: &Tensor) -> Tensor {
        linear(inputs, &self.weights, &self.bias, self.in_features, 1)
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
        Box::new(MSELoss)
    }

    fn metric(&self) -> Box<dyn Metric> {
        Box::new(RMSE)
    }

    fn input_dim(&self) -> usize {
        self.in_features
    }

    fn target_dim(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "regression"
    }
}
