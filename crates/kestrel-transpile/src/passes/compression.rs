//! Merging runs of single-qubit gates.
//!
//! A run is a maximal sequence of single-qubit gates on one qubit that no
//! multi-qubit gate or readout touching that qubit interrupts. Each merged
//! run is emitted where the run ends, which keeps the order on every wire.

use rustc_hash::FxHashMap;
use tracing::debug;

use kestrel_ir::{
    DEFAULT_TOLERANCE, Instruction, QuantumCircuit, QubitId, StandardGate, Unitary2x2,
};

use crate::decompose::universal_from_unitary;
use crate::error::TranspileResult;
use crate::transpiler::Transpiler;

/// Per-qubit runs awaiting emission.
struct Runs<T> {
    pending: FxHashMap<QubitId, T>,
}

impl<T> Runs<T> {
    fn new() -> Self {
        Self {
            pending: FxHashMap::default(),
        }
    }

    fn take(&mut self, qubit: QubitId) -> Option<T> {
        self.pending.remove(&qubit)
    }

    /// Remaining runs in ascending qubit order.
    fn drain(&mut self) -> Vec<(QubitId, T)> {
        let mut rest: Vec<_> = self.pending.drain().collect();
        rest.sort_unstable_by_key(|(q, _)| *q);
        rest
    }
}

/// Replaces every run of single-qubit gates with one `Universal`.
///
/// Single-qubit gates without a known matrix end the run and pass through.
#[derive(Debug, Clone, Copy)]
pub struct CompressSingleQubitGatesTranspiler {
    tolerance: f64,
}

impl CompressSingleQubitGatesTranspiler {
    /// Create the pass with the default tolerance.
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Tolerance used when extracting `Universal` angles.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for CompressSingleQubitGatesTranspiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Transpiler for CompressSingleQubitGatesTranspiler {
    fn name(&self) -> &'static str {
        "CompressSingleQubitGatesTranspiler"
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        let emit = |qubit: QubitId, u: Unitary2x2| {
            Instruction::single(universal_from_unitary(&u, self.tolerance), qubit)
        };

        let mut runs: Runs<Unitary2x2> = Runs::new();
        let mut out = Vec::with_capacity(circuit.num_instructions());
        for instruction in circuit.instructions() {
            if let (true, Some(u), &[qubit]) = (
                instruction.is_single_qubit_gate(),
                instruction.unitary(),
                instruction.qubits.as_slice(),
            ) {
                let product = runs.pending.entry(qubit).or_insert_with(Unitary2x2::identity);
                *product = u * *product;
                continue;
            }
            for qubit in &instruction.qubits {
                if let Some(u) = runs.take(*qubit) {
                    out.push(emit(*qubit, u));
                }
            }
            out.push(instruction.clone());
        }
        for (qubit, u) in runs.drain() {
            out.push(emit(qubit, u));
        }

        debug!(
            "Compressed {} instructions into {}",
            circuit.num_instructions(),
            out.len()
        );
        Ok(circuit.rebuild(out)?)
    }
}

/// Replaces every run of two or more Z-diagonal gates with one
/// `PhaseShift` of the summed angle.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressRzGatesTranspiler;

impl CompressRzGatesTranspiler {
    fn flush(qubit: QubitId, run: Vec<Instruction>, out: &mut Vec<Instruction>) {
        if run.len() < 2 {
            out.extend(run);
            return;
        }
        let total: f64 = run
            .iter()
            .filter_map(|i| i.as_gate().and_then(|g| g.z_angle()))
            .sum();
        out.push(Instruction::single(
            StandardGate::PhaseShift(Unitary2x2::normalize_angle(total)),
            qubit,
        ));
    }
}

impl Transpiler for CompressRzGatesTranspiler {
    fn name(&self) -> &'static str {
        "CompressRzGatesTranspiler"
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        let mut runs: Runs<Vec<Instruction>> = Runs::new();
        let mut out = Vec::with_capacity(circuit.num_instructions());
        for instruction in circuit.instructions() {
            let diagonal = instruction.is_single_qubit_gate()
                && instruction.as_gate().and_then(|g| g.z_angle()).is_some();
            if let (true, &[qubit]) = (diagonal, instruction.qubits.as_slice()) {
                runs.pending.entry(qubit).or_default().push(instruction.clone());
                continue;
            }
            for qubit in &instruction.qubits {
                if let Some(run) = runs.take(*qubit) {
                    Self::flush(*qubit, run, &mut out);
                }
            }
            out.push(instruction.clone());
        }
        for (qubit, run) in runs.drain() {
            Self::flush(qubit, run, &mut out);
        }
        Ok(circuit.rebuild(out)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equivalence::compare_circuits;
    use kestrel_ir::BitId;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn names(circuit: &QuantumCircuit) -> Vec<&str> {
        circuit.instructions().map(Instruction::name).collect()
    }

    #[test]
    fn test_runs_become_one_universal() {
        let mut circuit = QuantumCircuit::new(2, 2);
        circuit.h(QubitId(1)).unwrap();
        circuit.t(QubitId(1)).unwrap();
        circuit.rx(0.3, QubitId(2)).unwrap();
        circuit.cz(QubitId(1), QubitId(2)).unwrap();
        circuit.s(QubitId(2)).unwrap();
        circuit.y(QubitId(2)).unwrap();
        circuit.readout_all().unwrap();

        let out = CompressSingleQubitGatesTranspiler::new()
            .transpile(&circuit)
            .unwrap();
        assert_eq!(
            names(&out),
            vec!["universal", "universal", "control_z", "readout", "universal", "readout"]
        );
        assert!(compare_circuits(&circuit, &out).unwrap());
    }

    #[test]
    fn test_readout_bounds_a_run() {
        let mut circuit = QuantumCircuit::new(1, 1);
        circuit.h(QubitId(1)).unwrap();
        circuit.readout(QubitId(1), BitId(1)).unwrap();
        let out = CompressSingleQubitGatesTranspiler::new()
            .transpile(&circuit)
            .unwrap();
        assert_eq!(names(&out), vec!["universal", "readout"]);
    }

    #[test]
    fn test_compression_is_a_fixpoint() {
        let mut circuit = QuantumCircuit::new(2, 0);
        circuit.u(0.4, 1.2, -2.1, QubitId(1)).unwrap();
        circuit.h(QubitId(1)).unwrap();
        circuit.cx(QubitId(1), QubitId(2)).unwrap();
        circuit.ry(2.5, QubitId(2)).unwrap();

        let pass = CompressSingleQubitGatesTranspiler::new();
        let once = pass.transpile(&circuit).unwrap();
        let twice = pass.transpile(&once).unwrap();
        assert_eq!(once.num_instructions(), twice.num_instructions());
        for (a, b) in once.instructions().zip(twice.instructions()) {
            assert_eq!(a.name(), b.name());
            for ((_, x), (_, y)) in a.parameters().into_iter().zip(b.parameters()) {
                assert!((x - y).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_rz_runs_are_summed() {
        let mut circuit = QuantumCircuit::new(2, 0);
        circuit.t(QubitId(1)).unwrap();
        circuit.s(QubitId(1)).unwrap();
        circuit.rz(FRAC_PI_2, QubitId(1)).unwrap();
        circuit.t(QubitId(2)).unwrap();
        circuit.h(QubitId(2)).unwrap();
        circuit.z(QubitId(2)).unwrap();

        let out = CompressRzGatesTranspiler.transpile(&circuit).unwrap();
        assert_eq!(names(&out), vec!["pi_8", "phase_shift", "hadamard", "sigma_z"]);
        let Some(StandardGate::PhaseShift(phi)) = out.instructions().nth(1).unwrap().as_standard()
        else {
            panic!("expected a phase shift");
        };
        assert!((phi - (-3.0 * PI / 4.0)).abs() < 1e-12);
        assert!(compare_circuits(&circuit, &out).unwrap());
    }
}
