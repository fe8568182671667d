//! CLI surface
//!
//! `lanzar train` executes a run; `lanzar validate` checks the same
//! arguments without training. An unrecognized task selector is rejected
//! here, at parsing, before any trainer object exists.

pub mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{RunConfig, DEFAULT_SEED};
use crate::error::Result;
use crate::runner;
use crate::task::Task;
use logging::{log, LogLevel};

/// Lanzar: task-based training run orchestrator
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "lanzar")]
#[command(version)]
#[command(about = "Configure a model for a task, fit it, then evaluate it")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors and completion markers
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run a training run: fit then test
    Train(TrainArgs),

    /// Validate run arguments without training
    Validate(TrainArgs),
}

/// Arguments shared by `train` and `validate`
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// Prediction task to train
    #[arg(short, long, value_enum)]
    pub task: Task,

    /// Log/checkpoint directory
    #[arg(short, long)]
    pub logdir: PathBuf,

    /// Number of devices (1 = single-device, >1 = data-parallel)
    #[arg(short, long, default_value_t = 1)]
    pub devices: usize,

    /// Epoch budget
    #[arg(short, long, default_value_t = 10)]
    pub epochs: usize,

    /// Early-stopping patience in epochs
    #[arg(short, long, default_value_t = 3)]
    pub patience: usize,

    /// Random seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Learning rate
    #[arg(long, default_value_t = 0.05)]
    pub lr: f32,

    /// Samples per batch
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Synthetic dataset size
    #[arg(long, default_value_t = 512)]
    pub samples: usize,

    /// Features per sample
    #[arg(long, default_value_t = 8)]
    pub features: usize,

    /// Class count (multiclass task only)
    #[arg(long, default_value_t = 3)]
    pub classes: usize,
}

impl TrainArgs {
    /// Build the immutable run configuration
    pub fn to_config(&self) -> RunConfig {
        let mut config = RunConfig::new(self.task, &self.logdir);
        config.devices = self.devices;
        config.epochs = self.epochs;
        config.patience = self.patience;
        config.seed = self.seed;
        config.lr = self.lr;
        config.batch_size = self.batch_size;
        config.samples = self.samples;
        config.features = self.features;
        config.classes = self.classes;
        config
    }
}

/// Parse CLI arguments from an iterator (for testing)
pub fn parse_args<I, T>(args: I) -> std::result::Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Execute a parsed CLI invocation
pub fn run_command(cli: Cli) -> Result<()> {
    let level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Train(args) => {
            let config = args.to_config();
            runner::run(&config, level)?;
            Ok(())
        }
        Command::Validate(args) => {
            let config = args.to_config();
            config.validate()?;
            log(level, LogLevel::Normal, "configuration OK");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train_minimal() {
        let cli = parse_args(["lanzar", "train", "--task", "binary", "--logdir", "/tmp/x"])
            .unwrap();

        match cli.command {
            Command::Train(args) => {
                assert_eq!(args.task, Task::Binary);
                assert_eq!(args.logdir, PathBuf::from("/tmp/x"));
                assert_eq!(args.devices, 1);
                assert_eq!(args.epochs, 10);
                assert_eq!(args.patience, 3);
                assert_eq!(args.seed, DEFAULT_SEED);
            }
            Command::Validate(_) => panic!("expected train"),
        }
    }

    #[test]
    fn test_parse_all_tasks() {
        for (name, task) in [
            ("binary", Task::Binary),
            ("multiclass", Task::Multiclass),
            ("regression", Task::Regression),
        ] {
            let cli =
                parse_args(["lanzar", "train", "--task", name, "--logdir", "/tmp/x"]).unwrap();
            match cli.command {
                Command::Train(args) => assert_eq!(args.task, task),
                Command::Validate(_) => panic!("expected train"),
            }
        }
    }

    #[test]
    fn test_parse_rejects_unknown_task() {
        let result = parse_args(["lanzar", "train", "--task", "ranking", "--logdir", "/tmp/x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_requires_task_and_logdir() {
        assert!(parse_args(["lanzar", "train", "--logdir", "/tmp/x"]).is_err());
        assert!(parse_args(["lanzar", "train", "--task", "binary"]).is_err());
    }

    #[test]
    fn test_parse_overrides() {
        let cli = parse_args([
            "lanzar", "train", "--task", "multiclass", "--logdir", "/tmp/x", "--devices", "4",
            "--epochs", "20", "--patience", "5", "--seed", "7", "--lr", "0.01", "--batch-size",
            "64", "--classes", "5",
        ])
        .unwrap();

        match cli.command {
            Command::Train(args) => {
                let config = args.to_config();
                assert_eq!(config.devices, 4);
                assert_eq!(config.epochs, 20);
                assert_eq!(config.patience, 5);
                assert_eq!(config.seed, 7);
                assert_eq!(config.lr, 0.01);
                assert_eq!(config.batch_size, 64);
                assert_eq!(config.classes, 5);
            }
            Command::Validate(_) => panic!("expected train"),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = parse_args([
            "lanzar", "train", "--task", "binary", "--logdir", "/tmp/x", "--quiet",
        ])
        .unwrap();
        assert!(cli.quiet);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_validate_command_accepts_good_config() {
        let cli = parse_args(["lanzar", "validate", "--task", "binary", "--logdir", "/tmp/x"])
            .unwrap();
        // Validation does not touch the filesystem
        assert!(run_command(cli).is_ok());
    }

    #[test]
    fn test_validate_command_rejects_bad_config() {
        let cli = parse_args([
            "lanzar", "validate", "--task", "binary", "--logdir", "/tmp/x", "--devices", "0",
        ])
        .unwrap();
        assert!(run_command(cli).is_err());
    }
}
