//! Controlled-gate decomposition.

use tracing::debug;

use kestrel_ir::{DEFAULT_TOLERANCE, QuantumCircuit, StandardGate};

use crate::decompose::controlled_to_cz;
use crate::error::{TranspileError, TranspileResult};
use crate::passes::rewrite_each;
use crate::transpiler::Transpiler;

/// Rewrites singly controlled single-qubit gates as two `ControlZ` gates
/// with `Universal` corrections on the target.
///
/// `Controlled(SigmaX)` and `Controlled(SigmaZ)` are rejected in favour of
/// `control_x` and `control_z`; kernels on more than one qubit are rejected;
/// more than one control is not implemented.
#[derive(Debug, Clone, Copy)]
pub struct DecomposeControlledGatesTranspiler {
    tolerance: f64,
}

/// Name kept for callers that describe the pass by what it accepts.
pub type DecomposeSingleTargetSingleControlGatesTranspiler = DecomposeControlledGatesTranspiler;

impl DecomposeControlledGatesTranspiler {
    /// Create the pass with the default tolerance.
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Tolerance for the kernel's `Universal` angles.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl Default for DecomposeControlledGatesTranspiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Transpiler for DecomposeControlledGatesTranspiler {
    fn name(&self) -> &'static str {
        "DecomposeControlledGatesTranspiler"
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        rewrite_each(circuit, |instruction| {
            let Some(StandardGate::Controlled {
                kernel,
                num_controls,
            }) = instruction.as_standard()
            else {
                return Ok(vec![instruction.clone()]);
            };
            if *num_controls != 1 {
                return Err(TranspileError::NotImplemented {
                    pass: "DecomposeControlledGatesTranspiler",
                    gate: format!("controlled gate with {num_controls} controls"),
                });
            }
            let &[control, target] = instruction.qubits.as_slice() else {
                return Err(TranspileError::UnsupportedArgument {
                    pass: "DecomposeControlledGatesTranspiler",
                    gate: format!("controlled({})", kernel.name()),
                    reason: format!(
                        "only single-target kernels are supported, got {} qubits",
                        kernel.num_qubits()
                    ),
                });
            };
            debug!(
                "Decomposing controlled({}) on {} -> {}",
                kernel.name(),
                control,
                target
            );
            controlled_to_cz(kernel, control, target, self.tolerance)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equivalence::compare_circuits;
    use kestrel_ir::{ErrorKind, Instruction, QubitId};

    fn controlled(gate: StandardGate, controls: &[u32], target: u32) -> Instruction {
        Instruction::controlled(
            Instruction::single(gate, QubitId(target)),
            controls.iter().map(|c| QubitId(*c)),
        )
        .unwrap()
    }

    #[test]
    fn test_decomposes_controlled_hadamard() {
        let mut circuit = QuantumCircuit::new(3, 0);
        circuit.h(QubitId(1)).unwrap();
        circuit
            .push(controlled(StandardGate::Hadamard, &[1], 3))
            .unwrap();
        circuit
            .push(controlled(StandardGate::RotationY(0.8), &[3], 2))
            .unwrap();

        let out = DecomposeControlledGatesTranspiler::new()
            .transpile(&circuit)
            .unwrap();
        assert!(out.instructions().all(|i| i.name() != "controlled"));
        assert_eq!(
            out.instructions().filter(|i| i.name() == "control_z").count(),
            4
        );
        assert!(compare_circuits(&circuit, &out).unwrap());
    }

    #[test]
    fn test_rejects_controlled_sigma_x() {
        let circuit =
            QuantumCircuit::from_instructions(2, 0, [controlled(StandardGate::SigmaX, &[1], 2)])
                .unwrap();
        let err = DecomposeControlledGatesTranspiler::new()
            .transpile(&circuit)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);
        assert!(err.to_string().contains("control_x"));
    }

    #[test]
    fn test_rejects_wide_kernels_and_multiple_controls() {
        let cz_kernel = Instruction::controlled(
            Instruction::two(StandardGate::ControlZ, QubitId(2), QubitId(3)),
            [QubitId(1)],
        )
        .unwrap();
        let circuit = QuantumCircuit::from_instructions(3, 0, [cz_kernel]).unwrap();
        let err = DecomposeControlledGatesTranspiler::new()
            .transpile(&circuit)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);

        let circuit = QuantumCircuit::from_instructions(
            3,
            0,
            [controlled(StandardGate::Hadamard, &[1, 2], 3)],
        )
        .unwrap();
        let err = DecomposeControlledGatesTranspiler::new()
            .transpile(&circuit)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
    }
}
