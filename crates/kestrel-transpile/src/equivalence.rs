//! Functional equivalence of circuits.
//!
//! Two circuits are equivalent when they read out the same qubits into the
//! same bits and their gates act identically up to a global phase. The gate
//! comparison builds dense unitaries, so it is limited to
//! [`MAX_DENSE_QUBITS`](kestrel_ir::MAX_DENSE_QUBITS) qubits.

use std::collections::BTreeSet;

use tracing::debug;

use kestrel_ir::{BitId, QuantumCircuit, QubitId, circuit_unitary, equal_up_to_global_phase};

use crate::error::{TranspileError, TranspileResult};

/// Default tolerance for entrywise unitary comparison.
pub const EQUIVALENCE_TOLERANCE: f64 = 1e-8;

/// Whether `c1` and `c2` are equivalent at [`EQUIVALENCE_TOLERANCE`].
///
/// Fails if either circuit applies a gate to a qubit after reading it out.
pub fn compare_circuits(c1: &QuantumCircuit, c2: &QuantumCircuit) -> TranspileResult<bool> {
    compare_circuits_with_tolerance(c1, c2, EQUIVALENCE_TOLERANCE)
}

/// Whether `c1` and `c2` are equivalent within `tolerance`.
pub fn compare_circuits_with_tolerance(
    c1: &QuantumCircuit,
    c2: &QuantumCircuit,
    tolerance: f64,
) -> TranspileResult<bool> {
    let r1 = terminal_readouts(c1)?;
    let r2 = terminal_readouts(c2)?;
    if r1 != r2 {
        debug!("Readouts differ: {:?} vs {:?}", r1, r2);
        return Ok(false);
    }

    let width = c1.qubit_count().max(c2.qubit_count());
    let u1 = circuit_unitary(c1, width)?;
    let u2 = circuit_unitary(c2, width)?;
    Ok(equal_up_to_global_phase(&u1, &u2, tolerance))
}

/// The `(qubit, bit)` readout pairs, checking no gate follows a readout on
/// the same qubit.
fn terminal_readouts(circuit: &QuantumCircuit) -> TranspileResult<BTreeSet<(QubitId, BitId)>> {
    let mut readouts = BTreeSet::new();
    let mut read: BTreeSet<QubitId> = BTreeSet::new();
    for instruction in circuit.instructions() {
        if instruction.is_readout() {
            for (&qubit, &bit) in instruction.qubits.iter().zip(&instruction.bits) {
                readouts.insert((qubit, bit));
                read.insert(qubit);
            }
        } else if let Some(&qubit) = instruction.qubits.iter().find(|q| read.contains(q)) {
            return Err(TranspileError::NonTerminalReadout { qubit });
        }
    }
    Ok(readouts)
}
