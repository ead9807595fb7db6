//! Validation passes.
//!
//! These passes never rewrite the circuit. They return it unchanged or fail
//! with the first violation found, walking instructions in circuit order.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use kestrel_ir::{QuantumCircuit, QubitId, StandardGate};

use crate::connectivity::Connectivity;
use crate::error::{TranspileError, TranspileResult};
use crate::native::NativeGateSet;
use crate::transpiler::{PassKind, Transpiler};

/// Fails when a gate follows a readout on the same qubit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadoutsAreFinalInstructionsTranspiler;

impl Transpiler for ReadoutsAreFinalInstructionsTranspiler {
    fn name(&self) -> &'static str {
        "ReadoutsAreFinalInstructionsTranspiler"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        let mut read_out: FxHashSet<QubitId> = FxHashSet::default();
        for instruction in circuit.instructions() {
            if instruction.is_readout() {
                read_out.extend(instruction.qubits.iter().copied());
                continue;
            }
            if let Some(qubit) = instruction.qubits.iter().find(|q| read_out.contains(q)) {
                return Err(TranspileError::ReadoutNotFinal {
                    qubit: *qubit,
                    gate: instruction.name().to_string(),
                });
            }
        }
        Ok(circuit.clone())
    }
}

/// Fails when two readouts write the same classical bit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadoutsDoNotConflictTranspiler;

impl Transpiler for ReadoutsDoNotConflictTranspiler {
    fn name(&self) -> &'static str {
        "ReadoutsDoNotConflictTranspiler"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        let mut writers = FxHashMap::default();
        for readout in circuit.readouts() {
            let (Some(&qubit), Some(&bit)) = (readout.qubits.first(), readout.bits.first()) else {
                continue;
            };
            if let Some(first) = writers.insert(bit, qubit) {
                return Err(TranspileError::ConflictingReadouts {
                    bit,
                    first,
                    second: qubit,
                });
            }
        }
        Ok(circuit.clone())
    }
}

/// Fails on controlled gates with more than one control.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedGatesTranspiler;

impl Transpiler for UnsupportedGatesTranspiler {
    fn name(&self) -> &'static str {
        "UnsupportedGatesTranspiler"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        for instruction in circuit.instructions() {
            if let Some(StandardGate::Controlled { num_controls, .. }) = instruction.as_standard() {
                if *num_controls > 1 {
                    return Err(TranspileError::NotImplemented {
                        pass: "UnsupportedGatesTranspiler",
                        gate: format!("controlled gate with {num_controls} controls"),
                    });
                }
            }
        }
        Ok(circuit.clone())
    }
}

/// Fails unless every instruction can run on the device as is.
///
/// Gate kinds must be native, every qubit must be an active device
/// position, two-qubit gates must act on adjacent positions, and wider gates
/// on a connected set of positions.
#[derive(Debug, Clone)]
pub struct RejectNonNativeInstructionsTranspiler {
    connectivity: Connectivity,
    native_gates: NativeGateSet,
}

impl RejectNonNativeInstructionsTranspiler {
    /// Create the check for a device.
    pub fn new(connectivity: Connectivity, native_gates: NativeGateSet) -> Self {
        Self {
            connectivity,
            native_gates,
        }
    }
}

impl Transpiler for RejectNonNativeInstructionsTranspiler {
    fn name(&self) -> &'static str {
        "RejectNonNativeInstructionsTranspiler"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        if circuit.qubit_count() > self.connectivity.qubit_count() {
            return Err(TranspileError::CircuitTooLarge {
                required: circuit.qubit_count(),
                available: self.connectivity.qubit_count(),
            });
        }

        for instruction in circuit.instructions() {
            let gate = instruction.name();
            if let Some(qubit) = instruction
                .qubits
                .iter()
                .find(|q| !self.connectivity.is_active(**q))
            {
                return Err(TranspileError::QubitOutsideDevice {
                    gate: gate.to_string(),
                    qubit: *qubit,
                });
            }
            if !self.native_gates.contains(gate) {
                return Err(TranspileError::NonNativeGate {
                    gate: gate.to_string(),
                    qubits: instruction.qubits.clone(),
                });
            }
            if instruction.qubits.len() > 1 && !self.connectivity.is_connected_set(&instruction.qubits)
            {
                return Err(TranspileError::NotAdjacent {
                    gate: gate.to_string(),
                    qubits: instruction.qubits.clone(),
                    connectivity: self.connectivity.label(),
                });
            }
        }

        debug!(
            "All {} instructions are native to {}",
            circuit.num_instructions(),
            self.connectivity.label()
        );
        Ok(circuit.clone())
    }
}
