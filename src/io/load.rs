//! Checkpoint loading

use std::fs;
use std::path::Path;

use super::model::CheckpointState;
use crate::error::Result;

/// Load a checkpoint snapshot from a JSON file
pub fn load_checkpoint(path: impl AsRef<Path>) -> Result<CheckpointState> {
    let json = fs::read_to_string(path.as_ref())?;
    let state = serde_json::from_str(&json)?;
    Ok(state)
}
