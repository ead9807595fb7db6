//! Native gate sets of target devices.

use serde::{Deserialize, Serialize};

/// Gate kind names a device executes directly.
///
/// Readouts are always native and need not be listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct NativeGateSet {
    gates: Vec<String>,
}

impl NativeGateSet {
    /// Create a native gate set.
    pub fn new(gates: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut gates: Vec<String> = gates.into_iter().map(Into::into).collect();
        gates.sort();
        gates.dedup();
        Self { gates }
    }

    /// Check if a gate kind is native.
    pub fn contains(&self, gate: &str) -> bool {
        gate == "readout" || self.gates.binary_search_by(|g| g.as_str().cmp(gate)).is_ok()
    }

    /// Get the gate kind names, sorted.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }

    /// Phase shifts, half X rotations and `ControlZ`, the output vocabulary
    /// of the standard pipeline.
    pub fn phase_shift_cz() -> Self {
        Self::new([
            "phase_shift",
            "z_90",
            "z_minus_90",
            "sigma_z",
            "pi_8",
            "pi_8_dagger",
            "x_90",
            "x_minus_90",
            "sigma_x",
            "control_z",
        ])
    }
}

impl From<Vec<String>> for NativeGateSet {
    fn from(gates: Vec<String>) -> Self {
        Self::new(gates)
    }
}

impl From<NativeGateSet> for Vec<String> {
    fn from(set: NativeGateSet) -> Self {
        set.gates
    }
}

impl Default for NativeGateSet {
    fn default() -> Self {
        Self::phase_shift_cz()
    }
}
