//! Gradient clipping

use crate::Tensor;

/// Clip gradients to a maximum global L2 norm
///
/// Computes the L2 norm over every parameter's gradient and, when it
/// exceeds `max_norm`, scales all gradients down uniformly so the global
/// norm equals `max_norm`. Returns the pre-clip norm.
///
/// Gradients live in shared cells, so a slice of (cloned) parameter
/// tensors is enough.
pub fn clip_grad_norm(params: &[Tensor], max_norm: f32) -> f32 {
    let mut total_sq = 0.0f32;
    for param in params {
        if let Some(grad) = param.grad() {
            total_sq += grad.iter().map(|g| g * g).sum::<f32>();
        }
    }
    let total_norm = total_sq.sqrt();

    if total_norm > max_norm && total_norm > 0.0 {
        let scale = max_norm / total_norm;
        for param in params {
            if let Some(grad) = param.grad() {
                param.set_grad(&grad * scale);
            }
        }
    }

    total_norm
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn test_clip_within_norm_unchanged() {
        let param = Tensor::from_vec(vec![0.0, 0.0], true);
        param.set_grad(arr1(&[0.3, 0.4]));

        let norm = clip_grad_norm(&[param.clone()], 1.0);

        assert_relative_eq!(norm, 0.5);
        let grad = param.grad().unwrap();
        assert_relative_eq!(grad[0], 0.3);
        assert_relative_eq!(grad[1], 0.4);
    }

    #[test]
    fn test_clip_scales_down() {
        let param = Tensor::from_vec(vec![0.0, 0.0], true);
        param.set_grad(arr1(&[3.0, 4.0]));

        let norm = clip_grad_norm(&[param.clone()], 1.0);
        assert_relative_eq!(norm, 5.0);

        let grad = param.grad().unwrap();
        let clipped_norm = (grad[0] * grad[0] + grad[1] * grad[1]).sqrt();
        assert_relative_eq!(clipped_norm, 1.0, epsilon = 1e-6);
        // Direction preserved
        assert_relative_eq!(grad[0] / grad[1], 0.75, epsilon = 1e-6);
    }

    #[test]
    fn test_clip_global_across_params() {
        let a = Tensor::from_vec(vec![0.0], true);
        let b = Tensor::from_vec(vec![0.0], true);
        a.set_grad(arr1(&[3.0]));
        b.set_grad(arr1(&[4.0]));

        clip_grad_norm(&[a.clone(), b.clone()], 1.0);

        let ga = a.grad().unwrap()[0];
        let gb = b.grad().unwrap()[0];
        assert_relative_eq!((ga * ga + gb * gb).sqrt(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_clip_no_grads() {
        let param = Tensor::from_vec(vec![1.0], true);
        let norm = clip_grad_norm(&[param], 1.0);
        assert_eq!(norm, 0.0);
    }
}
