//! Step, epoch, and validation operations

use crate::device::ExecBackend;
use crate::model::Model;
use crate::optim::clip_grad_norm;
use crate::train::Batch;

impl<M: Model> super::Trainer<M> {
    /// Perform a single training step on one batch
    ///
    /// Under the data-parallel backend the batch is split into per-device
    /// shards; gradients accumulate across shards and are averaged before
    /// the optimizer step, so the update matches single-device math on
    /// evenly divided batches.
    ///
    /// Returns the batch loss (averaged over shards).
    pub fn train_step(&mut self, batch: &Batch) -> f32 {
        self.optimizer.zero_grad_refs(&mut self.model.params_mut());

        let shards = match &self.backend {
            ExecBackend::SingleDevice => vec![batch.clone()],
            ExecBackend::DataParallel { devices } => {
                batch.shard(devices.len(), self.model.input_dim(), self.model.target_dim())
            }
        };
        let n_shards = shards.len();

        let mut loss_sum = 0.0;
        for shard in &shards {
            let predictions = self.model.forward(&shard.inputs);
            let loss = self.loss_fn.forward(&predictions, &shard.targets);
            loss_sum += loss.data()[0];
            loss.backward();
        }

        if n_shards > 1 {
            let scale = 1.0 / n_shards as f32;
            for param in self.model.params() {
                if let Some(grad) = param.grad() {
                    param.set_grad(&grad * scale);
                }
            }
        }

        if let Some(max_norm) = self.config.max_grad_norm {
            clip_grad_norm(&self.model.params(), max_norm);
        }

        self.optimizer.step_refs(&mut self.model.params_mut());
        self.metrics.increment_step();

        loss_sum / n_shards as f32
    }

    /// Train for one epoch over the given batches
    ///
    /// Returns the average batch loss.
    pub fn train_epoch(&mut self, batches: &[Batch], epoch: usize) -> f32 {
        let mut total_loss = 0.0;
        let mut num_batches = 0;

        for (i, batch) in batches.iter().enumerate() {
            let loss = self.train_step(batch);
            total_loss += loss;
            num_batches += 1;

            if (i + 1) % self.config.log_interval == 0 {
                let avg_loss = total_loss / num_batches as f32;
                println!(
                    "Epoch {}, Step {}: loss={:.4}, lr={:.6}",
                    epoch + 1,
                    i + 1,
                    avg_loss,
                    self.lr()
                );
            }
        }

        if num_batches > 0 {
            total_loss / num_batches as f32
        } else {
            0.0
        }
    }

    /// Compute the average loss over batches without updating parameters
    pub fn validate(&self, batches: &[Batch]) -> f32 {
        let mut total_loss = 0.0;
        let mut num_batches = 0;

        for batch in batches {
            let predictions = self.model.forward(&batch.inputs);
            let loss = self.loss_fn.forward(&predictions, &batch.targets);
            total_loss += loss.data()[0];
            num_batches += 1;
        }

        if num_batches > 0 {
            total_loss / num_batches as f32
        } else {
            0.0
        }
    }
}
