//! Autograd operations
//!
//! The task models are all affine maps, so the only tape op needed is
//! `linear`: a batched `[batch x in] -> [batch x out]` transform over
//! flattened row-major tensors, with backward accumulation into the weight
//! and bias gradient cells.

use std::cell::RefCell;
use std::rc::Rc;

use ndarray::Array1;

use super::{BackwardOp, Tensor};

/// Batched affine transform: `y[i, o] = sum_j w[o, j] * x[i, j] + b[o]`
///
/// `inputs` holds `batch * in_features` values row-major, `weights` holds
/// `out_features * in_features` values row-major, `bias` holds
/// `out_features` values. Returns `batch * out_features` values row-major.
///
/// # Panics
///
/// Panics if the tensor lengths are inconsistent with the given dimensions.
///
/// # Example
///
/// ```
/// use lanzar::autograd::ops::linear;
/// use lanzar::Tensor;
///
/// // One sample, two features, one output: y = 1*1 + 2*2 + 0.5
/// let x = Tensor::from_vec(vec![1.0, 2.0], false);
/// let w = Tensor::from_vec(vec![1.0, 2.0], true);
/// let b = Tensor::from_vec(vec![0.5], true);
///
/// let y = linear(&x, &w, &b, 2, 1);
/// assert_eq!(y.data()[0], 5.5);
/// ```
pub fn linear(
    inputs: &Tensor,
    weights: &Tensor,
    bias: &Tensor,
    in_features: usize,
    out_features: usize,
) -> Tensor {
    assert!(in_features > 0 && out_features > 0, "dimensions must be positive");
    assert_eq!(
        inputs.len() % in_features,
        0,
        "input length must be a multiple of in_features"
    );
    assert_eq!(weights.len(), out_features * in_features, "weight length mismatch");
    assert_eq!(bias.len(), out_features, "bias length mismatch");

    let batch = inputs.len() / in_features;
    let x = inputs.data();
    let w = weights.data();
    let b = bias.data();

    let mut out = Array1::zeros(batch * out_features);
    for i in 0..batch {
        for o in 0..out_features {
            let mut acc = b[o];
            for j in 0..in_features {
                acc += w[o * in_features + j] * x[i * in_features + j];
            }
            out[i * out_features + o] = acc;
        }
    }

    let requires_grad =
        inputs.requires_grad() || weights.requires_grad() || bias.requires_grad();
    let mut result = Tensor::new(out, requires_grad);

    if requires_grad {
        let op = Rc::new(LinearBackward {
            inputs: inputs.clone(),
            weights: weights.clone(),
            bias: bias.clone(),
            in_features,
            out_features,
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(op);
    }

    result
}

struct LinearBackward {
    inputs: Tensor,
    weights: Tensor,
    bias: Tensor,
    in_features: usize,
    out_features: usize,
    result_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for LinearBackward {
    fn backward(&self) {
        let grad = match self.result_grad.borrow().as_ref() {
            Some(g) => g.clone(),
            None => return,
        };
        let batch = grad.len() / self.out_features;

        if self.weights.requires_grad() || self.bias.requires_grad() {
            let x = self.inputs.data();
            let mut grad_w = Array1::zeros(self.out_features * self.in_features);
            let mut grad_b = Array1::zeros(self.out_features);

            for i in 0..batch {
                for o in 0..self.out_features {
                    let g = grad[i * self.out_features + o];
                    grad_b[o] += g;
                    for j in 0..self.in_features {
                        grad_w[o * self.in_features + j] += g * x[i * self.in_features + j];
                    }
                }
            }

            if self.weights.requires_grad() {
                self.weights.accumulate_grad(grad_w);
            }
            if self.bias.requires_grad() {
                self.bias.accumulate_grad(grad_b);
            }
        }

        if self.inputs.requires_grad() {
            let w = self.weights.data();
            let mut grad_x = Array1::zeros(batch * self.in_features);
            for i in 0..batch {
                for o in 0..self.out_features {
                    let g = grad[i * self.out_features + o];
                    for j in 0..self.in_features {
                        grad_x[i * self.in_features + j] += g * w[o * self.in_features + j];
                    }
                }
            }
            self.inputs.accumulate_grad(grad_x);

            if let Some(op) = self.inputs.backward_op() {
                op.backward();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn test_linear_forward_single_output() {
        // y = 1*1 + 2*2 + 0.5 = 5.5
        let x = Tensor::from_vec(vec![1.0, 2.0], false);
        let w = Tensor::from_vec(vec![1.0, 2.0], true);
        let b = Tensor::from_vec(vec![0.5], true);

        let y = linear(&x, &w, &b, 2, 1);
        assert_eq!(y.len(), 1);
        assert_relative_eq!(y.data()[0], 5.5);
    }

    #[test]
    fn test_linear_forward_batched() {
        // Two samples, one feature, one output: y = 3x + 1
        let x = Tensor::from_vec(vec![1.0, 2.0], false);
        let w = Tensor::from_vec(vec![3.0], true);
        let b = Tensor::from_vec(vec![1.0], true);

        let y = linear(&x, &w, &b, 1, 1);
        assert_eq!(y.len(), 2);
        assert_relative_eq!(y.data()[0], 4.0);
        assert_relative_eq!(y.data()[1], 7.0);
    }

    #[test]
    fn test_linear_forward_multi_output() {
        // One sample, two features, two outputs
        let x = Tensor::from_vec(vec![1.0, 2.0], false);
        let w = Tensor::from_vec(vec![1.0, 0.0, 0.0, 1.0], true); // identity rows
        let b = Tensor::from_vec(vec![0.0, 0.0], true);

        let y = linear(&x, &w, &b, 2, 2);
        assert_relative_eq!(y.data()[0], 1.0);
        assert_relative_eq!(y.data()[1], 2.0);
    }

    #[test]
    fn test_linear_backward_gradients() {
        let x = Tensor::from_vec(vec![1.0, 2.0], false);
        let w = Tensor::from_vec(vec![3.0, 4.0], true);
        let b = Tensor::from_vec(vec![0.0], true);

        let y = linear(&x, &w, &b, 2, 1);
        y.set_grad(arr1(&[1.0]));
        y.backward_op().unwrap().backward();

        // dL/dw = g * x, dL/db = g
        let gw = w.grad().unwrap();
        assert_relative_eq!(gw[0], 1.0);
        assert_relative_eq!(gw[1], 2.0);
        let gb = b.grad().unwrap();
        assert_relative_eq!(gb[0], 1.0);
    }

    #[test]
    fn test_linear_backward_accumulates_over_batch() {
        let x = Tensor::from_vec(vec![1.0, 2.0], false); // two samples, one feature
        let w = Tensor::from_vec(vec![1.0], true);
        let b = Tensor::from_vec(vec![0.0], true);

        let y = linear(&x, &w, &b, 1, 1);
        y.set_grad(arr1(&[1.0, 1.0]));
        y.backward_op().unwrap().backward();

        // dL/dw = 1*1 + 1*2 = 3, dL/db = 2
        assert_relative_eq!(w.grad().unwrap()[0], 3.0);
        assert_relative_eq!(b.grad().unwrap()[0], 2.0);
    }

    #[test]
    fn test_linear_matches_finite_differences() {
        let x = Tensor::from_vec(vec![0.3, -0.7, 1.2], false);
        let w = Tensor::from_vec(vec![0.5, -0.25, 0.1], true);
        let b = Tensor::from_vec(vec![0.05], true);

        // Loss = y^2 / 2, so dL/dy = y and dL/dw_j = y * x_j
        let y = linear(&x, &w, &b, 3, 1);
        let y0 = y.data()[0];
        y.set_grad(arr1(&[y0]));
        y.backward_op().unwrap().backward();
        let analytic = w.grad().unwrap();

        let eps = 1e-3;
        for j in 0..3 {
            let mut w_plus = w.data().to_vec();
            w_plus[j] += eps;
            let y_plus = {
                let wp = Tensor::from_vec(w_plus, false);
                linear(&x, &wp, &b, 3, 1).data()[0]
            };
            let mut w_minus = w.data().to_vec();
            w_minus[j] -= eps;
            let y_minus = {
                let wm = Tensor::from_vec(w_minus, false);
                linear(&x, &wm, &b, 3, 1).data()[0]
            };
            let numeric = (y_plus * y_plus - y_minus * y_minus) / (2.0 * 2.0 * eps);
            assert_relative_eq!(analytic[j], numeric, epsilon = 1e-2);
        }
    }

    #[test]
    #[should_panic(expected = "weight length mismatch")]
    fn test_linear_weight_mismatch() {
        let x = Tensor::from_vec(vec![1.0, 2.0], false);
        let w = Tensor::from_vec(vec![1.0], true);
        let b = Tensor::from_vec(vec![0.0], true);
        linear(&x, &w, &b, 2, 1);
    }

    #[test]
    fn test_linear_no_grad_when_untracked() {
        let x = Tensor::from_vec(vec![1.0], false);
        let w = Tensor::from_vec(vec![1.0], false);
        let b = Tensor::from_vec(vec![0.0], false);

        let y = linear(&x, &w, &b, 1, 1);
        assert!(y.backward_op().is_none());
        assert!(!y.requires_grad());
    }
}
