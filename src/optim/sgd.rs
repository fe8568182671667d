//! Stochastic Gradient Descent optimizer

use ndarray::Array1;

use super::Optimizer;
use crate::Tensor;

/// SGD optimizer with optional momentum
///
/// # Example
///
/// ```
/// use lanzar::optim::{Optimizer, SGD};
///
/// let opt = SGD::new(0.05, 0.9);
/// assert_eq!(opt.lr(), 0.05);
/// ```
pub struct SGD {
    lr: f32,
    momentum: f32,
    velocities: Vec<Option<Array1<f32>>>,
}

impl SGD {
    /// Create a new SGD optimizer
    pub fn new(lr: f32, momentum: f32) -> Self {
        Self {
            lr,
            momentum,
            velocities: Vec::new(),
        }
    }

    fn ensure_velocities(&mut self, n: usize) {
        if self.velocities.len() != n {
            self.velocities = (0..n).map(|_| None).collect();
        }
    }

    fn update_one(&mut self, i: usize, param: &mut Tensor) {
        let Some(grad) = param.grad() else { return };

        if self.momentum > 0.0 {
            // v = momentum * v - lr * grad
            let velocity = match &self.velocities[i] {
                Some(v) => v * self.momentum - &grad * self.lr,
                None => &grad * (-self.lr),
            };
            *param.data_mut() = param.data() + &velocity;
            self.velocities[i] = Some(velocity);
        } else {
            *param.data_mut() = param.data() - &(&grad * self.lr);
        }
    }
}

impl Optimizer for SGD {
    fn step(&mut self, params: &mut [Tensor]) {
        self.ensure_velocities(params.len());
        for (i, param) in params.iter_mut().enumerate() {
            self.update_one(i, param);
        }
    }

    fn step_refs(&mut self, params: &mut [&mut Tensor]) {
        self.ensure_velocities(params.len());
        for (i, param) in params.iter_mut().enumerate() {
            self.update_one(i, param);
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }
}
