//! Experiment tracking
//!
//! Records what each training run was configured with and what it
//! produced: hyperparameters, per-step metrics, artifact paths, and the
//! final status. Persistence is pluggable through the
//! [`TrackingBackend`](storage::TrackingBackend) trait; the orchestrator
//! uses the JSON-file backend so every run's configuration is recoverable
//! from its log directory.
//!
//! # Example
//!
//! ```
//! use lanzar::tracking::storage::InMemoryBackend;
//! use lanzar::tracking::{ExperimentTracker, RunStatus};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tracker = ExperimentTracker::new("demo", InMemoryBackend::new());
//!
//! let run_id = tracker.start_run(Some("baseline"))?;
//! tracker.log_param(&run_id, "lr", "0.05")?;
//! tracker.log_metric(&run_id, "avg_val_loss", 0.42, 1)?;
//! tracker.end_run(&run_id, RunStatus::Completed)?;
//!
//! let run = tracker.get_run(&run_id)?;
//! assert_eq!(run.params.get("lr").map(String::as_str), Some("0.05"));
//! # Ok(())
//! # }
//! ```

pub mod storage;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use storage::{JsonFileBackend, TrackingBackend, TrackingStorageError};

/// Status of a tracking run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Run is actively recording
    Active,
    /// Run completed successfully
    Completed,
    /// Run failed
    Failed,
}

/// A single experiment run
///
/// Tracks hyperparameters, metrics (per-step values), artifact paths, and
/// start/end timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    /// Unique identifier for the run
    pub run_id: String,
    /// Optional human-readable name
    pub run_name: Option<String>,
    /// Parent experiment name
    pub experiment_name: String,
    /// Current status
    pub status: RunStatus,
    /// Hyperparameters: key -> string-encoded value
    pub params: HashMap<String, String>,
    /// Metrics: key -> list of (value, step)
    pub metrics: HashMap<String, Vec<(f64, u64)>>,
    /// Artifact paths
    pub artifacts: Vec<String>,
    /// Unix timestamp (ms) when the run started
    pub start_time_ms: Option<u64>,
    /// Unix timestamp (ms) when the run ended
    pub end_time_ms: Option<u64>,
}

impl Run {
    fn new(run_id: String, run_name: Option<String>, experiment_name: String) -> Self {
        Self {
            run_id,
            run_name,
            experiment_name,
            status: RunStatus::Active,
            params: HashMap::new(),
            metrics: HashMap::new(),
            artifacts: Vec::new(),
            start_time_ms: Some(now_ms()),
            end_time_ms: None,
        }
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Errors from experiment tracking operations
#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Run is not active: {0}")]
    RunNotActive(String),

    #[error("Storage error: {0}")]
    Storage(#[from] TrackingStorageError),
}

/// Result alias for tracking operations
pub type Result<T> = std::result::Result<T, TrackingError>;

/// Experiment tracker
///
/// Manages runs under a single experiment name. Active runs live in
/// memory; ending a run persists it through the backend.
#[derive(Debug)]
pub struct ExperimentTracker<B: TrackingBackend> {
    experiment_name: String,
    backend: B,
    active_runs: HashMap<String, Run>,
    next_run_id: u64,
}

impl<B: TrackingBackend> ExperimentTracker<B> {
    /// Create a new tracker for the given experiment name
    pub fn new(experiment_name: impl Into<String>, backend: B) -> Self {
        Self {
            experiment_name: experiment_name.into(),
            backend,
            active_runs: HashMap::new(),
            next_run_id: 1,
        }
    }

    /// Get the experiment name
    #[must_use]
    pub fn experiment_name(&self) -> &str {
        &self.experiment_name
    }

    /// Start a new run, optionally with a human-readable name
    ///
    /// Returns the run ID.
    pub fn start_run(&mut self, run_name: Option<&str>) -> Result<String> {
        let run_id = format!("run-{}", self.next_run_id);
        self.next_run_id += 1;

        let run = Run::new(
            run_id.clone(),
            run_name.map(String::from),
            self.experiment_name.clone(),
        );
        self.active_runs.insert(run_id.clone(), run);
        Ok(run_id)
    }

    /// End a run with the given status, persisting it to the backend
    pub fn end_run(&mut self, run_id: &str, status: RunStatus) -> Result<()> {
        let mut run = self
            .active_runs
            .remove(run_id)
            .ok_or_else(|| TrackingError::RunNotFound(run_id.to_string()))?;

        run.status = status;
        run.end_time_ms = Some(now_ms());

        self.backend.save_run(&run)?;
        Ok(())
    }

    /// Log a single hyperparameter
    pub fn log_param(&mut self, run_id: &str, key: &str, value: &str) -> Result<()> {
        let run = self.active_run_mut(run_id)?;
        run.params.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Log multiple hyperparameters at once
    pub fn log_params(&mut self, run_id: &str, params: &HashMap<String, String>) -> Result<()> {
        let run = self.active_run_mut(run_id)?;
        for (k, v) in params {
            run.params.insert(k.clone(), v.clone());
        }
        Ok(())
    }

    /// Log a metric value at a given step
    pub fn log_metric(&mut self, run_id: &str, key: &str, value: f64, step: u64) -> Result<()> {
        let run = self.active_run_mut(run_id)?;
        run.metrics
            .entry(key.to_string())
            .or_default()
            .push((value, step));
        Ok(())
    }

    /// Log an artifact path
    pub fn log_artifact(&mut self, run_id: &str, path: &str) -> Result<()> {
        let run = self.active_run_mut(run_id)?;
        run.artifacts.push(path.to_string());
        Ok(())
    }

    /// Retrieve a run by ID
    ///
    /// Checks active (in-memory) runs first, then the backend.
    pub fn get_run(&self, run_id: &str) -> Result<Run> {
        if let Some(run) = self.active_runs.get(run_id) {
            return Ok(run.clone());
        }
        self.backend
            .load_run(run_id)
            .map_err(|e| TrackingError::RunNotFound(format!("{run_id}: {e}")))
    }

    /// List all runs (active + persisted)
    pub fn list_runs(&self) -> Result<Vec<Run>> {
        let mut runs: Vec<Run> = self.active_runs.values().cloned().collect();
        for r in self.backend.list_runs()? {
            if !self.active_runs.contains_key(&r.run_id) {
                runs.push(r);
            }
        }
        runs.sort_by(|a, b| a.run_id.cmp(&b.run_id));
        Ok(runs)
    }

    fn active_run_mut(&mut self, run_id: &str) -> Result<&mut Run> {
        self.active_runs
            .get_mut(run_id)
            .ok_or_else(|| TrackingError::RunNotActive(run_id.to_string()))
    }
}

/// A tracker bound to one run in a log directory
///
/// This is the logger handle the orchestrator threads into the trainer:
/// hyperparameters are recorded before training, metrics per epoch during
/// it, and the run record lands under `<logdir>/runs` when finished.
#[derive(Debug)]
pub struct RunLogger {
    tracker: ExperimentTracker<JsonFileBackend>,
    run_id: String,
}

impl RunLogger {
    /// Start a run logging under `<logdir>/runs`
    pub fn create(
        logdir: impl AsRef<Path>,
        experiment_name: &str,
        run_name: Option<&str>,
    ) -> Result<Self> {
        let backend = JsonFileBackend::new(logdir.as_ref().join("runs"));
        let mut tracker = ExperimentTracker::new(experiment_name, backend);
        let run_id = tracker.start_run(run_name)?;
        Ok(Self { tracker, run_id })
    }

    /// The run ID this logger records under
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Record all hyperparameters at once
    pub fn log_params(&mut self, params: &HashMap<String, String>) -> Result<()> {
        self.tracker.log_params(&self.run_id, params)
    }

    /// Record a metric value at a step
    pub fn log_metric(&mut self, key: &str, value: f64, step: u64) -> Result<()> {
        self.tracker.log_metric(&self.run_id, key, value, step)
    }

    /// Record an artifact path
    pub fn log_artifact(&mut self, path: &Path) -> Result<()> {
        self.tracker
            .log_artifact(&self.run_id, &path.display().to_string())
    }

    /// Finish the run and persist its record
    pub fn finish(&mut self, status: RunStatus) -> Result<()> {
        self.tracker.end_run(&self.run_id, status)
    }

    /// Path of the persisted run record
    pub fn record_path(&self) -> PathBuf {
        self.tracker.backend.run_path(&self.run_id)
    }
}
