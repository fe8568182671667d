//! Device list and execution backend resolution
//!
//! A requested device count resolves to the index list `[0, 1, ...,
//! count-1]`, and the list length picks the execution backend: one device
//! runs without any data-parallel machinery, more than one selects the
//! data-parallel backend. The two cases are structurally distinct
//! variants, decided once and threaded into trainer construction.

use serde::Serialize;

/// Resolve a device count into a sequential list of device indices
pub fn device_list(count: usize) -> Vec<usize> {
    (0..count).collect()
}

/// How batches are executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExecBackend {
    /// One device: each batch is processed whole
    SingleDevice,
    /// Several devices: each batch is split into per-device shards and
    /// gradients are averaged across shards before the optimizer step
    DataParallel { devices: Vec<usize> },
}

impl ExecBackend {
    /// Choose the backend for a device list
    ///
    /// # Panics
    ///
    /// Panics on an empty device list; configuration validation rejects a
    /// device count of zero before this point.
    pub fn resolve(devices: &[usize]) -> Self {
        assert!(!devices.is_empty(), "device list must not be empty");
        if devices.len() == 1 {
            Self::SingleDevice
        } else {
            Self::DataParallel {
                devices: devices.to_vec(),
            }
        }
    }

    /// Number of batch shards this backend processes per step
    pub fn num_shards(&self) -> usize {
        match self {
            Self::SingleDevice => 1,
            Self::DataParallel { devices } => devices.len(),
        }
    }

    /// Short backend name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::SingleDevice => "single",
            Self::DataParallel { .. } => "dp",
        }
    }
}
