//! Transpiler configuration files.
//!
//! A configuration names the target device and, optionally, its native gate
//! set and the numeric tolerance of the passes. Files are JSON or YAML,
//! chosen by extension:
//!
//! ```yaml
//! device:
//!   qubit_count: 6
//!   connectivity_type: lattice
//!   rows: 2
//!   cols: 3
//!   excluded_positions: [6]
//! native_gates: [phase_shift, x_90, x_minus_90, control_z]
//! tolerance: 1.0e-9
//! restore_layout: true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::connectivity::{Connectivity, ConnectivityDescription};
use crate::error::{TranspileError, TranspileResult};
use crate::native::NativeGateSet;

fn default_restore_layout() -> bool {
    true
}

/// Everything needed to build the standard pipeline for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranspilerConfig {
    /// Target device topology.
    pub device: ConnectivityDescription,

    /// Native gate names; the phase-shift/CZ set when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_gates: Option<Vec<String>>,

    /// Numeric tolerance for angle folding and decomposition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,

    /// Undo routing swaps after each gate.
    #[serde(default = "default_restore_layout")]
    pub restore_layout: bool,
}

impl TranspilerConfig {
    /// Configuration for `device` with every other setting at its default.
    pub fn for_device(device: &Connectivity) -> Self {
        Self {
            device: device.to_description(),
            native_gates: None,
            tolerance: None,
            restore_layout: true,
        }
    }

    /// Load a configuration from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> TranspileResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| TranspileError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "json" => Self::from_json_str(&source),
            "yaml" | "yml" => Self::from_yaml_str(&source),
            other => Err(TranspileError::InvalidConfiguration(format!(
                "unknown configuration format '{other}' for {}, expected json, yaml or yml",
                path.display()
            ))),
        }
    }

    /// Parse a JSON configuration.
    pub fn from_json_str(source: &str) -> TranspileResult<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML configuration.
    pub fn from_yaml_str(source: &str) -> TranspileResult<Self> {
        let config: Self = serde_yaml_ng::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> TranspileResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the device description and the tolerance.
    pub fn validate(&self) -> TranspileResult<()> {
        self.connectivity()?;
        if let Some(tolerance) = self.tolerance {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(TranspileError::InvalidConfiguration(format!(
                    "tolerance must be a positive number, got {tolerance}"
                )));
            }
        }
        Ok(())
    }

    /// The device connectivity.
    pub fn connectivity(&self) -> TranspileResult<Connectivity> {
        Connectivity::from_description(&self.device)
    }

    /// The native gate set, defaulting to [`NativeGateSet::phase_shift_cz`].
    pub fn native_gate_set(&self) -> NativeGateSet {
        self.native_gates
            .as_ref()
            .map_or_else(NativeGateSet::phase_shift_cz, |gates| NativeGateSet::new(gates))
    }
}
