//! Gate-for-sequence substitutions.
//!
//! Each pass replaces one family of gates with its closed-form sequence from
//! [`crate::decompose`] and leaves every other instruction alone.

use kestrel_ir::{DEFAULT_TOLERANCE, Instruction, QuantumCircuit, StandardGate};

use crate::decompose::{
    cx_to_cz, expand_cx, iswap_dagger_to_cx, iswap_to_cx, rx_to_half_rotations, swap_to_cx,
    to_phase_shift_and_half_rotation_x, toffoli_to_cx, universal_to_rz_rx_rz,
};
use crate::error::TranspileResult;
use crate::passes::rewrite_each;
use crate::transpiler::Transpiler;

/// Replaces `ControlX` with `H`, `ControlZ`, `H`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CastCXToCZGateTranspiler;

impl Transpiler for CastCXToCZGateTranspiler {
    fn name(&self) -> &'static str {
        "CastCXToCZGateTranspiler"
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        rewrite_each(circuit, |instruction| {
            Ok(match (instruction.as_standard(), instruction.qubits.as_slice()) {
                (Some(StandardGate::ControlX), &[control, target]) => cx_to_cz(control, target),
                _ => vec![instruction.clone()],
            })
        })
    }
}

/// Replaces `Swap` with three `ControlZ`-based CX gates.
#[derive(Debug, Clone, Copy, Default)]
pub struct CastSwapToCZGateTranspiler;

impl Transpiler for CastSwapToCZGateTranspiler {
    fn name(&self) -> &'static str {
        "CastSwapToCZGateTranspiler"
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        rewrite_each(circuit, |instruction| {
            Ok(match (instruction.as_standard(), instruction.qubits.as_slice()) {
                (Some(StandardGate::Swap), &[a, b]) => expand_cx(swap_to_cx(a, b)),
                _ => vec![instruction.clone()],
            })
        })
    }
}

/// Replaces `ISwap` and `ISwapDagger` with two `ControlZ` gates and
/// single-qubit corrections.
#[derive(Debug, Clone, Copy, Default)]
pub struct CastISwapToCZGateTranspiler;

impl Transpiler for CastISwapToCZGateTranspiler {
    fn name(&self) -> &'static str {
        "CastISwapToCZGateTranspiler"
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        rewrite_each(circuit, |instruction| {
            Ok(match (instruction.as_standard(), instruction.qubits.as_slice()) {
                (Some(StandardGate::ISwap), &[a, b]) => expand_cx(iswap_to_cx(a, b)),
                (Some(StandardGate::ISwapDagger), &[a, b]) => expand_cx(iswap_dagger_to_cx(a, b)),
                _ => vec![instruction.clone()],
            })
        })
    }
}

/// Replaces `Toffoli` with six `ControlX` gates and T phases.
#[derive(Debug, Clone, Copy, Default)]
pub struct CastToffoliToCXGateTranspiler;

impl Transpiler for CastToffoliToCXGateTranspiler {
    fn name(&self) -> &'static str {
        "CastToffoliToCXGateTranspiler"
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        rewrite_each(circuit, |instruction| {
            Ok(match (instruction.as_standard(), instruction.qubits.as_slice()) {
                (Some(StandardGate::Toffoli), &[c1, c2, target]) => toffoli_to_cx(c1, c2, target),
                _ => vec![instruction.clone()],
            })
        })
    }
}

/// Replaces `Universal` with `PhaseShift`, `RotationX`, `PhaseShift`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CastUniversalToRzRxRzTranspiler;

impl Transpiler for CastUniversalToRzRxRzTranspiler {
    fn name(&self) -> &'static str {
        "CastUniversalToRzRxRzTranspiler"
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        rewrite_each(circuit, |instruction| {
            Ok(match (instruction.as_standard(), instruction.qubits.as_slice()) {
                (Some(StandardGate::Universal(theta, phi, lambda)), &[qubit]) => {
                    universal_to_rz_rx_rz(*theta, *phi, *lambda, qubit)
                }
                _ => vec![instruction.clone()],
            })
        })
    }
}

/// Replaces `RotationX` with phase shifts around half X rotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CastRxToRzAndHalfRotationXTranspiler;

impl Transpiler for CastRxToRzAndHalfRotationXTranspiler {
    fn name(&self) -> &'static str {
        "CastRxToRzAndHalfRotationXTranspiler"
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        rewrite_each(circuit, |instruction| {
            Ok(match (instruction.as_standard(), instruction.qubits.as_slice()) {
                (Some(StandardGate::RotationX(theta)), &[qubit]) => {
                    rx_to_half_rotations(*theta, qubit)
                }
                _ => vec![instruction.clone()],
            })
        })
    }
}

/// Rewrites every single-qubit gate with a known matrix over
/// `PhaseShift`, `X90` and `XM90`.
#[derive(Debug, Clone, Copy)]
pub struct CastToPhaseShiftAndHalfRotationXTranspiler {
    tolerance: f64,
}

impl CastToPhaseShiftAndHalfRotationXTranspiler {
    /// Create the pass with the default tolerance.
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Tolerance below which a gate counts as diagonal.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for CastToPhaseShiftAndHalfRotationXTranspiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Transpiler for CastToPhaseShiftAndHalfRotationXTranspiler {
    fn name(&self) -> &'static str {
        "CastToPhaseShiftAndHalfRotationXTranspiler"
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        rewrite_each(circuit, |instruction: &Instruction| {
            if !instruction.is_single_qubit_gate() {
                return Ok(vec![instruction.clone()]);
            }
            Ok(to_phase_shift_and_half_rotation_x(instruction, self.tolerance)
                .unwrap_or_else(|| vec![instruction.clone()]))
        })
    }
}
