//! Serializable checkpoint state

use serde::{Deserialize, Serialize};

/// One named parameter vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedParam {
    /// Parameter name (e.g. "weights", "bias")
    pub name: String,
    /// Flattened parameter values
    pub values: Vec<f32>,
}

impl NamedParam {
    /// Create a named parameter
    pub fn new(name: impl Into<String>, values: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// A model snapshot: parameters plus identifying metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointState {
    /// Model name ("binary", "multiclass", "regression")
    pub model: String,
    /// Epoch the snapshot was taken at (0-indexed)
    pub epoch: usize,
    /// Monitored validation loss at snapshot time
    pub val_loss: f32,
    /// Parameter vectors
    pub params: Vec<NamedParam>,
}

impl CheckpointState {
    /// Create a snapshot
    pub fn new(
        model: impl Into<String>,
        epoch: usize,
        val_loss: f32,
        params: Vec<NamedParam>,
    ) -> Self {
        Self {
            model: model.into(),
            epoch,
            val_loss,
            params,
        }
    }

    /// Look up a parameter vector by name
    pub fn param(&self, name: &str) -> Option<&[f32]> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.values.as_slice())
    }
}
