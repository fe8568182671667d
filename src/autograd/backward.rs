//! Backward operation trait for the gradient tape

/// A recorded operation that can propagate gradients to its inputs
///
/// Implementations read the output gradient from the cell they captured at
/// forward time, accumulate into their inputs' gradient cells, and recurse
/// into the inputs' own backward ops.
pub trait BackwardOp {
    /// Propagate gradients backward through this operation
    fn backward(&self);
}
