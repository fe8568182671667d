//! Loss functions
//!
//! One loss per task: MSE for regression, BCE-with-logits for binary
//! classification, batched cross-entropy for multiclass classification.

mod bce_with_logits;
mod cross_entropy;
mod mse;
mod traits;

pub use bce_with_logits::BCEWithLogitsLoss;
pub use cross_entropy::CrossEntropyLoss;
pub use mse::MSELoss;
pub use traits::LossFn;
