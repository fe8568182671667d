//! Tape-based autograd for 1-D tensors
//!
//! Provides the minimal automatic differentiation the linear task models
//! need: a tensor with a shared gradient cell and a backward-op tape.
//! Clones of a tensor share the gradient cell, so a model can hand clones
//! of its parameters to the tape while keeping ownership of the data.

mod backward;
mod tensor;

pub mod ops;

pub use backward::BackwardOp;
pub use tensor::Tensor;

/// Perform a backward pass starting from a (scalar) tensor
///
/// Seeds the gradient with ones unless `grad_output` is given, then walks
/// the tape recorded on the tensor.
pub fn backward(tensor: &Tensor, grad_output: Option<ndarray::Array1<f32>>) {
    let seed = grad_output.unwrap_or_else(|| ndarray::Array1::ones(tensor.len()));
    tensor.set_grad(seed);

    if let Some(op) = tensor.backward_op() {
        op.backward();
    }
}
