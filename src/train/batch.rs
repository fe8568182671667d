//! Batch data structure

use crate::Tensor;

/// A training batch containing inputs and targets
///
/// Inputs hold `rows * input_dim` values row-major; targets hold
/// `rows * target_dim` values row-major.
#[derive(Clone)]
pub struct Batch {
    /// Input features
    pub inputs: Tensor,
    /// Target labels/values
    pub targets: Tensor,
}

impl Batch {
    /// Create a new batch
    pub fn new(inputs: Tensor, targets: Tensor) -> Self {
        Self { inputs, targets }
    }

    /// Number of samples, given the width of one input row
    pub fn rows(&self, input_dim: usize) -> usize {
        self.inputs.len() / input_dim
    }

    /// Split into `n` contiguous shards of near-equal row counts
    ///
    /// Used by the data-parallel backend: each shard is processed
    /// separately and gradients are averaged across shards. Shards are
    /// never empty; fewer than `n` shards are returned when there are
    /// fewer rows than shards.
    pub fn shard(&self, n: usize, input_dim: usize, target_dim: usize) -> Vec<Batch> {
        let rows = self.rows(input_dim);
        if n <= 1 || rows <= 1 {
            return vec![self.clone()];
        }

        let n = n.min(rows);
        let base = rows / n;
        let extra = rows % n;

        let mut shards = Vec::with_capacity(n);
        let mut row = 0;
        for k in 0..n {
            let take = base + usize::from(k < extra);
            let inputs = self.inputs.data().as_slice().expect("contiguous inputs")
                [row * input_dim..(row + take) * input_dim]
                .to_vec();
            let targets = self.targets.data().as_slice().expect("contiguous targets")
                [row * target_dim..(row + take) * target_dim]
                .to_vec();
            shards.push(Batch::new(
                Tensor::from_vec(inputs, false),
                Tensor::from_vec(targets, false),
            ));
            row += take;
        }
        shards
    }
}
