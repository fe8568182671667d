//! Run orchestrator
//!
//! Assembles one training run from its configuration and executes the two
//! phases in strict sequence: seed the RNG, resolve devices, create the
//! log directory, select the model, wire logger + policies + backend into
//! a trainer, fit, then test. Any error propagates; there is no retry or
//! partial-failure recovery.

use std::fs;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::logging::{log, LogLevel};
use crate::config::RunConfig;
use crate::data::{synthetic, DataSplits};
use crate::device::{device_list, ExecBackend};
use crate::error::Result;
use crate::model::TaskModel;
use crate::optim::SGD;
use crate::task::Task;
use crate::tracking::{RunLogger, RunStatus};
use crate::train::{
    CheckpointPolicy, EarlyStopping, FitReport, TestReport, TrainConfig, Trainer,
};

/// Printed after the fit phase completes
pub const TRAIN_FINISH_MARKER: &str = "##### training finish #####";
/// Printed after the test phase completes
pub const TEST_FINISH_MARKER: &str = "##### test finish #####";

/// Minimum improvement for the early-stopping patience window
const EARLY_STOP_MIN_DELTA: f32 = 1e-4;

/// What a completed run produced
#[derive(Debug)]
pub struct RunReport {
    /// Fit phase outcome
    pub fit: FitReport,
    /// Test phase outcome
    pub test: TestReport,
    /// Where the best-model snapshot lives
    pub checkpoint_path: PathBuf,
    /// Tracking run ID
    pub run_id: String,
}

/// Execute one training run to completion
///
/// Side effects: the log directory tree is created, a run record and a
/// best-model checkpoint are written under it, and the two completion
/// markers are printed to stdout (one after fit, one after test).
pub fn run(config: &RunConfig, level: LogLevel) -> Result<RunReport> {
    config.validate()?;

    // Seed first: every stochastic component below draws from this RNG
    let mut rng = StdRng::seed_from_u64(config.seed);

    let devices = device_list(config.devices);
    fs::create_dir_all(&config.logdir)?;

    let splits = build_splits(config, &mut rng);
    let model = TaskModel::for_task(config.task, config.features, config.classes, &mut rng);

    let mut logger = RunLogger::create(&config.logdir, "lanzar", Some(config.task.as_str()))?;
    logger.log_params(&config.to_params())?;
    let run_id = logger.run_id().to_string();

    let early_stop = EarlyStopping::new(config.patience, EARLY_STOP_MIN_DELTA);
    let checkpoint = CheckpointPolicy::new(config.logdir.join("checkpoint"));
    let checkpoint_path = checkpoint.best_path();

    let backend = ExecBackend::resolve(&devices);

    log(
        level,
        LogLevel::Normal,
        &format!(
            "task={} devices={} backend={} epochs={} patience={} seed={}",
            config.task,
            config.devices,
            backend.name(),
            config.epochs,
            config.patience,
            config.seed
        ),
    );

    let train_config = TrainConfig::new()
        .with_epochs(config.epochs)
        .with_batch_size(config.batch_size)
        .with_log_interval(match level {
            LogLevel::Verbose => 1,
            LogLevel::Normal => 10,
            LogLevel::Quiet => usize::MAX,
        });

    let mut trainer = Trainer::new(
        model,
        Box::new(SGD::new(config.lr, 0.9)),
        train_config,
    );
    trainer.set_backend(backend);
    trainer.set_logger(logger);
    trainer.set_checkpoint(checkpoint);
    trainer.add_callback(early_stop);

    let fit = trainer.fit(&splits)?;
    println!("{TRAIN_FINISH_MARKER}");

    let test = trainer.test(&splits)?;
    println!("{TEST_FINISH_MARKER}");

    trainer.close_run(RunStatus::Completed)?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "fit: {} epochs, best val loss {:.4}; test: loss {:.4}, {} {:.4}",
            fit.epochs_run,
            fit.best_val_loss.unwrap_or(f32::NAN),
            test.loss,
            test.metric_name,
            test.metric_value
        ),
    );

    Ok(RunReport {
        fit,
        test,
        checkpoint_path,
        run_id,
    })
}

fn build_splits(config: &RunConfig, rng: &mut StdRng) -> DataSplits {
    let dataset = match config.task {
        Task::Binary => synthetic::binary_blobs(config.samples, config.features, rng),
        Task::Multiclass => {
            synthetic::multiclass_blobs(config.samples, config.features, config.classes, rng)
        }
        Task::Regression => synthetic::linear_regression(config.samples, config.features, 0.1, rng),
    };
    DataSplits::split(dataset, config.val_fraction, config.test_fraction, rng)
}
