//! Checkpoint saving

use std::fs;
use std::path::Path;

use super::model::CheckpointState;
use crate::error::Result;

/// Save a checkpoint snapshot as pretty-printed JSON
///
/// Creates the parent directory if absent. Overwrites any existing file at
/// `path` (the policy retains only the best snapshot).
///
/// # Example
///
/// ```no_run
/// use lanzar::io::{save_checkpoint, CheckpointState, NamedParam};
///
/// let state = CheckpointState::new(
///     "binary",
///     0,
///     0.5,
///     vec![NamedParam::new("weights", vec![1.0, 2.0])],
/// );
/// save_checkpoint(&state, "runs/checkpoint/best.json").unwrap();
/// ```
pub fn save_checkpoint(state: &CheckpointState, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}
