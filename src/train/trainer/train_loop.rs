//! Fit and test phases

use std::time::Instant;

use crate::error::Result;
use crate::io::{save_checkpoint, CheckpointState};
use crate::model::Model;
use crate::tracking::RunStatus;
use crate::train::callback::CallbackAction;
use crate::train::trainer::{FitReport, TestReport};
use crate::data::DataSplits;

impl<M: Model> super::Trainer<M> {
    /// Run the fit phase: up to the configured epoch budget of
    /// train/validate rounds
    ///
    /// Each epoch trains over the train partition, computes the average
    /// validation loss, records both into the run logger, snapshots the
    /// model when the checkpoint policy reports an improvement, and fires
    /// callbacks (early stopping) with the validation loss. Blocking; the
    /// test phase must not start until this returns.
    pub fn fit(&mut self, splits: &DataSplits) -> Result<FitReport> {
        self.start_time = Some(Instant::now());
        self.best_val_loss = None;
        let max_epochs = self.config.epochs;
        let mut stopped_early = false;
        let mut final_train_loss = 0.0;

        let ctx = self.build_context(0, 0.0, None);
        if self.callbacks.on_train_begin(&ctx) == CallbackAction::Stop {
            return Ok(FitReport {
                epochs_run: 0,
                final_train_loss: 0.0,
                best_val_loss: None,
                stopped_early: true,
                elapsed_secs: self.elapsed_secs(),
            });
        }

        let train_batches = splits.train.batches(self.config.batch_size);
        let val_batches = splits.val.batches(self.config.batch_size);

        for epoch in 0..max_epochs {
            let train_loss = self.train_epoch(&train_batches, epoch);
            final_train_loss = train_loss;

            let val_loss = self.validate(&val_batches);
            self.metrics.record_epoch(train_loss, self.lr());
            self.metrics.record_val_loss(val_loss);

            if self.best_val_loss.is_none_or(|best| val_loss < best) {
                self.best_val_loss = Some(val_loss);
            }

            if let Some(logger) = self.logger.as_mut() {
                let step = (epoch + 1) as u64;
                logger.log_metric("train_loss", f64::from(train_loss), step)?;
                logger.log_metric("avg_val_loss", f64::from(val_loss), step)?;
            }

            if let Some(policy) = self.checkpoint.as_mut() {
                if policy.observe(epoch, val_loss) {
                    let state = CheckpointState::new(
                        self.model.name(),
                        epoch,
                        val_loss,
                        self.model.snapshot(),
                    );
                    save_checkpoint(&state, policy.best_path())?;
                }
            }

            let ctx = self.build_context(epoch, train_loss, Some(val_loss));
            if self.callbacks.on_epoch_end(&ctx) == CallbackAction::Stop {
                stopped_early = true;
                break;
            }
        }

        if let Some(policy) = self.checkpoint.as_ref() {
            if policy.last_saved_epoch.is_some() {
                let path = policy.best_path();
                if let Some(logger) = self.logger.as_mut() {
                    logger.log_artifact(&path)?;
                }
            }
        }

        let ctx = self.build_context(self.metrics.epoch, final_train_loss, None);
        self.callbacks.on_train_end(&ctx);

        Ok(FitReport {
            epochs_run: self.metrics.epoch,
            final_train_loss,
            best_val_loss: self.best_val_loss,
            stopped_early,
            elapsed_secs: self.elapsed_secs(),
        })
    }

    /// Run the test phase on the held-out partition
    ///
    /// Evaluates the trained model's loss and task metric; no parameters
    /// are updated. Blocking.
    pub fn test(&mut self, splits: &DataSplits) -> Result<TestReport> {
        let batch = splits.test.as_batch();
        let predictions = self.model.forward(&batch.inputs);
        let loss = self.loss_fn.forward(&predictions, &batch.targets).data()[0];

        let metric = self.model.metric();
        let metric_value = metric.compute(&predictions, &batch.targets);
        let metric_name = metric.name().to_string();

        if let Some(logger) = self.logger.as_mut() {
            logger.log_metric("test_loss", f64::from(loss), 0)?;
            logger.log_metric(&format!("test_{metric_name}"), f64::from(metric_value), 0)?;
        }

        Ok(TestReport {
            loss,
            metric_name,
            metric_value,
            n_samples: splits.test.len(),
        })
    }

    /// Finish the bound run record with the given status
    pub fn close_run(&mut self, status: RunStatus) -> Result<()> {
        if let Some(logger) = self.logger.as_mut() {
            logger.finish(status)?;
        }
        Ok(())
    }

    fn elapsed_secs(&self) -> f64 {
        self.start_time.map_or(0.0, |t| t.elapsed().as_secs_f64())
    }
}
