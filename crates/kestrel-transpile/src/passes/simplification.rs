//! Dropping and renaming trivial gates.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use kestrel_ir::{DEFAULT_TOLERANCE, Instruction, QuantumCircuit, StandardGate, Unitary2x2};

use crate::error::TranspileResult;
use crate::passes::rewrite_each;
use crate::transpiler::Transpiler;

/// Named gate matching `angle` within `tolerance`, if any.
///
/// `Ok(None)` means the angle is negligible and the gate can be dropped.
fn fold_angle(
    angle: f64,
    tolerance: f64,
    table: &[(f64, StandardGate)],
) -> Result<Option<StandardGate>, f64> {
    let angle = Unitary2x2::normalize_angle(angle);
    if angle.abs() <= tolerance {
        return Ok(None);
    }
    // Angles near -π normalize to either end of (-π, π].
    if (angle.abs() - PI).abs() <= tolerance {
        if let Some((_, gate)) = table.iter().find(|(a, _)| *a == PI) {
            return Ok(Some(gate.clone()));
        }
    }
    table
        .iter()
        .find(|(a, _)| (angle - a).abs() <= tolerance)
        .map(|(_, gate)| Some(gate.clone()))
        .ok_or(angle)
}

macro_rules! tolerance_pass {
    ($ty:ident) => {
        impl $ty {
            /// Create the pass with the default tolerance.
            pub fn new() -> Self {
                Self {
                    tolerance: DEFAULT_TOLERANCE,
                }
            }

            /// Angles within `tolerance` of a named value are folded.
            #[must_use]
            pub fn with_tolerance(mut self, tolerance: f64) -> Self {
                self.tolerance = tolerance;
                self
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

/// Drops negligible `PhaseShift` gates and renames the ones at `±π/2`,
/// `π` and `±π/4` to `Z90`, `ZM90`, `SigmaZ`, `Pi8` and `Pi8Dagger`.
#[derive(Debug, Clone, Copy)]
pub struct SimplifyRzGatesTranspiler {
    tolerance: f64,
}

tolerance_pass!(SimplifyRzGatesTranspiler);

impl Transpiler for SimplifyRzGatesTranspiler {
    fn name(&self) -> &'static str {
        "SimplifyRzGatesTranspiler"
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        let table = [
            (FRAC_PI_2, StandardGate::Z90),
            (-FRAC_PI_2, StandardGate::ZM90),
            (PI, StandardGate::SigmaZ),
            (FRAC_PI_4, StandardGate::Pi8),
            (-FRAC_PI_4, StandardGate::Pi8Dagger),
        ];
        rewrite_each(circuit, |instruction| {
            let (Some(StandardGate::PhaseShift(phi)), &[qubit]) =
                (instruction.as_standard(), instruction.qubits.as_slice())
            else {
                return Ok(vec![instruction.clone()]);
            };
            Ok(match fold_angle(*phi, self.tolerance, &table) {
                Ok(None) => vec![],
                Ok(Some(gate)) => vec![Instruction::single(gate, qubit)],
                Err(phi) => vec![Instruction::single(StandardGate::PhaseShift(phi), qubit)],
            })
        })
    }
}

/// Drops negligible `RotationX` gates and renames the ones at `±π/2` and
/// `π` to `X90`, `XM90` and `SigmaX`.
#[derive(Debug, Clone, Copy)]
pub struct SimplifyRxGatesTranspiler {
    tolerance: f64,
}

tolerance_pass!(SimplifyRxGatesTranspiler);

impl Transpiler for SimplifyRxGatesTranspiler {
    fn name(&self) -> &'static str {
        "SimplifyRxGatesTranspiler"
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        let table = [
            (FRAC_PI_2, StandardGate::X90),
            (-FRAC_PI_2, StandardGate::XM90),
            (PI, StandardGate::SigmaX),
        ];
        rewrite_each(circuit, |instruction| {
            let (Some(StandardGate::RotationX(theta)), &[qubit]) =
                (instruction.as_standard(), instruction.qubits.as_slice())
            else {
                return Ok(vec![instruction.clone()]);
            };
            Ok(match fold_angle(*theta, self.tolerance, &table) {
                Ok(None) => vec![],
                Ok(Some(gate)) => vec![Instruction::single(gate, qubit)],
                Err(theta) => vec![Instruction::single(StandardGate::RotationX(theta), qubit)],
            })
        })
    }
}

/// Drops single-qubit gates equal to the identity up to global phase.
#[derive(Debug, Clone, Copy)]
pub struct SimplifyTrivialGatesTranspiler {
    tolerance: f64,
}

tolerance_pass!(SimplifyTrivialGatesTranspiler);

impl Transpiler for SimplifyTrivialGatesTranspiler {
    fn name(&self) -> &'static str {
        "SimplifyTrivialGatesTranspiler"
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        rewrite_each(circuit, |instruction| {
            let trivial = instruction.is_single_qubit_gate()
                && instruction
                    .unitary()
                    .is_some_and(|u| u.is_identity_within(self.tolerance));
            Ok(if trivial {
                vec![]
            } else {
                vec![instruction.clone()]
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_ir::QubitId;

    fn single(gate: StandardGate) -> QuantumCircuit {
        QuantumCircuit::from_instructions(1, 0, [Instruction::single(gate, QubitId(1))]).unwrap()
    }

    fn names(circuit: &QuantumCircuit) -> Vec<&str> {
        circuit.instructions().map(Instruction::name).collect()
    }

    #[test]
    fn test_rz_folding() {
        let pass = SimplifyRzGatesTranspiler::new();
        let cases = [
            (0.0, vec![]),
            (2.0 * PI, vec![]),
            (FRAC_PI_2, vec!["z_90"]),
            (-FRAC_PI_2, vec!["z_minus_90"]),
            (PI, vec!["sigma_z"]),
            (-PI, vec!["sigma_z"]),
            (FRAC_PI_4, vec!["pi_8"]),
            (-FRAC_PI_4 + 2.0 * PI, vec!["pi_8_dagger"]),
            (0.3, vec!["phase_shift"]),
        ];
        for (phi, expected) in cases {
            let out = pass.transpile(&single(StandardGate::PhaseShift(phi))).unwrap();
            assert_eq!(names(&out), expected, "phi = {phi}");
        }
    }

    #[test]
    fn test_rz_tolerance_boundary() {
        let circuit = single(StandardGate::PhaseShift(1e-3));
        let strict = SimplifyRzGatesTranspiler::new().transpile(&circuit).unwrap();
        assert_eq!(strict.num_instructions(), 1);
        let loose = SimplifyRzGatesTranspiler::new()
            .with_tolerance(1e-1)
            .transpile(&circuit)
            .unwrap();
        assert_eq!(loose.num_instructions(), 0);
    }

    #[test]
    fn test_rx_folding() {
        let pass = SimplifyRxGatesTranspiler::new();
        let cases = [
            (0.0, vec![]),
            (FRAC_PI_2, vec!["x_90"]),
            (-FRAC_PI_2, vec!["x_minus_90"]),
            (PI, vec!["sigma_x"]),
            (1.0, vec!["rotation_x"]),
        ];
        for (theta, expected) in cases {
            let out = pass.transpile(&single(StandardGate::RotationX(theta))).unwrap();
            assert_eq!(names(&out), expected, "theta = {theta}");
        }
    }

    #[test]
    fn test_trivial_gates_dropped() {
        let mut circuit = QuantumCircuit::new(2, 0);
        circuit.push(Instruction::single(StandardGate::Identity, QubitId(1))).unwrap();
        circuit.u(0.0, 0.0, 0.0, QubitId(1)).unwrap();
        circuit.rz(2.0 * PI, QubitId(2)).unwrap();
        circuit.h(QubitId(2)).unwrap();
        circuit.cz(QubitId(1), QubitId(2)).unwrap();

        let out = SimplifyTrivialGatesTranspiler::new().transpile(&circuit).unwrap();
        assert_eq!(names(&out), vec!["hadamard", "control_z"]);
        assert_eq!(out.qubit_count(), 2);
    }
}
