//! Lanzar: task-based training run orchestrator
//!
//! Given a task selector (binary, multiclass, regression), lanzar
//! assembles a training run — seeded RNG, synthetic dataset, linear model,
//! experiment logger, early-stopping and checkpoint policies, execution
//! backend — and executes the fit phase followed by the test phase.
//!
//! # Example
//!
//! ```no_run
//! use lanzar::cli::logging::LogLevel;
//! use lanzar::config::RunConfig;
//! use lanzar::runner;
//! use lanzar::task::Task;
//!
//! let config = RunConfig::new(Task::Binary, "runs/demo");
//! let report = runner::run(&config, LogLevel::Normal).unwrap();
//! println!("test accuracy: {:.3}", report.test.metric_value);
//! ```

pub mod autograd;
pub mod cli;
pub mod config;
pub mod data;
pub mod device;
pub mod error;
pub mod io;
pub mod model;
pub mod optim;
pub mod runner;
pub mod task;
pub mod tracking;
pub mod train;

pub use autograd::Tensor;
pub use config::RunConfig;
pub use error::{Error, Result};
pub use task::Task;
