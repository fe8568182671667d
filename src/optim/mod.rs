//! Optimizers for the task models

mod clip;
mod optimizer;
mod sgd;

pub use clip::clip_grad_norm;
pub use optimizer::Optimizer;
pub use sgd::SGD;
