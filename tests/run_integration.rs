//! End-to-end run orchestration tests
//!
//! Drives `runner::run` against a fresh temporary log directory and checks
//! the externally observable contract: both phases complete in order, the
//! directory tree and checkpoint artifact exist, the run record carries
//! the configuration, and identical configurations reproduce identical
//! results.

use lanzar::cli::logging::LogLevel;
use lanzar::cli::{parse_args, run_command, Command};
use lanzar::config::RunConfig;
use lanzar::io::load_checkpoint;
use lanzar::runner;
use lanzar::task::Task;

fn quick_config(task: Task, logdir: &std::path::Path) -> RunConfig {
    let mut config = RunConfig::new(task, logdir);
    config.epochs = 1;
    config.patience = 1;
    config.samples = 64;
    config.features = 4;
    config.batch_size = 16;
    config
}

#[test]
fn binary_run_produces_checkpoint_in_fresh_logdir() {
    let dir = tempfile::tempdir().unwrap();
    let logdir = dir.path().join("does-not-exist-yet");
    assert!(!logdir.exists());

    let config = quick_config(Task::Binary, &logdir);
    let report = runner::run(&config, LogLevel::Quiet).unwrap();

    // The log directory and the checkpoint artifact now exist
    assert!(logdir.is_dir());
    assert!(report.checkpoint_path.exists());
    assert_eq!(
        report.checkpoint_path,
        logdir.join("checkpoint").join("best.json")
    );

    // Fit ran within its one-epoch budget, then test measured the model
    assert_eq!(report.fit.epochs_run, 1);
    assert!(report.test.loss.is_finite());
    assert_eq!(report.test.metric_name, "accuracy");
}

#[test]
fn every_task_resolves_and_completes() {
    for task in [Task::Binary, Task::Multiclass, Task::Regression] {
        let dir = tempfile::tempdir().unwrap();
        let config = quick_config(task, dir.path());

        let report = runner::run(&config, LogLevel::Quiet).unwrap();

        // The checkpoint records the model named after the task
        let state = load_checkpoint(&report.checkpoint_path).unwrap();
        assert_eq!(state.model, task.as_str());
    }
}

#[test]
fn run_record_holds_full_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let config = quick_config(Task::Multiclass, dir.path());

    let report = runner::run(&config, LogLevel::Quiet).unwrap();

    let record_path = dir
        .path()
        .join("runs")
        .join(format!("{}.json", report.run_id));
    let record = std::fs::read_to_string(record_path).unwrap();

    // Hyperparameters were logged before training, so the run's
    // configuration is recoverable from its artifacts
    for key in [
        "task",
        "devices",
        "epochs",
        "patience",
        "seed",
        "lr",
        "batch_size",
    ] {
        assert!(record.contains(key), "missing hyperparameter {key}");
    }
    assert!(record.contains("Completed"));
    assert!(record.contains("checkpoint"));
}

#[test]
fn identical_configs_reproduce_identical_checkpoints() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    let report_a =
        runner::run(&quick_config(Task::Regression, dir_a.path()), LogLevel::Quiet).unwrap();
    let report_b =
        runner::run(&quick_config(Task::Regression, dir_b.path()), LogLevel::Quiet).unwrap();

    let bytes_a = std::fs::read(&report_a.checkpoint_path).unwrap();
    let bytes_b = std::fs::read(&report_b.checkpoint_path).unwrap();
    assert_eq!(bytes_a, bytes_b);

    // A different seed diverges
    let dir_c = tempfile::tempdir().unwrap();
    let mut config_c = quick_config(Task::Regression, dir_c.path());
    config_c.seed = 1;
    let report_c = runner::run(&config_c, LogLevel::Quiet).unwrap();
    let bytes_c = std::fs::read(&report_c.checkpoint_path).unwrap();
    assert_ne!(bytes_a, bytes_c);
}

#[test]
fn device_count_selects_backend_but_not_results_shape() {
    for devices in [1usize, 2, 4] {
        let dir = tempfile::tempdir().unwrap();
        let mut config = quick_config(Task::Binary, dir.path());
        config.devices = devices;

        let report = runner::run(&config, LogLevel::Quiet).unwrap();
        assert!(report.checkpoint_path.exists(), "devices={devices}");
        assert!(report.test.loss.is_finite());
    }
}

#[test]
fn cli_train_command_runs_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let logdir = dir.path().join("cli-run");

    let cli = parse_args([
        "lanzar",
        "--quiet",
        "train",
        "--task",
        "binary",
        "--logdir",
        logdir.to_str().unwrap(),
        "--epochs",
        "1",
        "--patience",
        "1",
        "--samples",
        "64",
        "--features",
        "4",
    ])
    .unwrap();
    assert!(matches!(cli.command, Command::Train(_)));

    run_command(cli).unwrap();

    assert!(logdir.join("checkpoint").join("best.json").exists());
    assert!(logdir.join("runs").is_dir());
}

#[test]
fn cli_rejects_unknown_task_before_any_side_effect() {
    let dir = tempfile::tempdir().unwrap();
    let logdir = dir.path().join("never-created");

    let result = parse_args([
        "lanzar",
        "train",
        "--task",
        "clustering",
        "--logdir",
        logdir.to_str().unwrap(),
    ]);

    assert!(result.is_err());
    assert!(!logdir.exists());
}
