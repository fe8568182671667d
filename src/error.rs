//! Crate-wide error type
//!
//! Every failure is fatal to the run: errors propagate to the process
//! boundary and are printed once by `main`. Nothing is caught, retried, or
//! logged-and-continued.

use thiserror::Error;

/// Errors surfaced by the run orchestrator and its supporting modules
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid run configuration (bad flag values, impossible splits)
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Filesystem failure (log directory, checkpoint files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Experiment tracking failure
    #[error("tracking error: {0}")]
    Tracking(#[from] crate::tracking::TrackingError),

    /// Checkpoint or run-record serialization failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
