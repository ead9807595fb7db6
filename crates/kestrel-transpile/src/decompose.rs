//! Closed-form gate decompositions.
//!
//! Every rule returns instructions in circuit order (first applied first)
//! whose product equals the input gate up to a global phase.

use std::f64::consts::{FRAC_PI_2, PI};

use kestrel_ir::{GateKind, Instruction, QubitId, StandardGate, Unitary2x2};

use crate::error::{TranspileError, TranspileResult};

fn normalize(angle: f64) -> f64 {
    Unitary2x2::normalize_angle(angle)
}

/// `Universal` gate equal to `u` up to global phase.
pub fn universal_from_unitary(u: &Unitary2x2, tolerance: f64) -> StandardGate {
    let angles = u.universal_angles(tolerance);
    StandardGate::Universal(angles.theta, angles.phi, angles.lambda)
}

/// `Universal(θ, φ, λ)` as `PhaseShift(λ - π/2)`, `RotationX(θ)`,
/// `PhaseShift(φ + π/2)`.
pub fn universal_to_rz_rx_rz(theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> Vec<Instruction> {
    vec![
        Instruction::single(StandardGate::PhaseShift(normalize(lambda - FRAC_PI_2)), qubit),
        Instruction::single(StandardGate::RotationX(theta), qubit),
        Instruction::single(StandardGate::PhaseShift(normalize(phi + FRAC_PI_2)), qubit),
    ]
}

/// `RotationX(θ)` as `ZM90, XM90, PhaseShift(θ), X90, Z90`.
pub fn rx_to_half_rotations(theta: f64, qubit: QubitId) -> Vec<Instruction> {
    vec![
        Instruction::single(StandardGate::ZM90, qubit),
        Instruction::single(StandardGate::XM90, qubit),
        Instruction::single(StandardGate::PhaseShift(normalize(theta)), qubit),
        Instruction::single(StandardGate::X90, qubit),
        Instruction::single(StandardGate::Z90, qubit),
    ]
}

/// A single-qubit gate over `PhaseShift`, `X90` and `XM90` only.
///
/// Gates diagonal in the computational basis become one `PhaseShift`.
/// `X90` and `XM90` are returned unchanged. Any other gate with a known
/// matrix becomes `PhaseShift(λ - π), XM90, PhaseShift(θ), X90,
/// PhaseShift(φ + π)`. Returns `None` for gates without a 2x2 matrix.
pub fn to_phase_shift_and_half_rotation_x(
    instruction: &Instruction,
    tolerance: f64,
) -> Option<Vec<Instruction>> {
    let qubit = *instruction.qubits.first()?;
    let gate = instruction.as_gate()?;

    if let Some(angle) = gate.z_angle() {
        return Some(vec![Instruction::single(
            StandardGate::PhaseShift(normalize(angle)),
            qubit,
        )]);
    }
    if matches!(
        gate.as_standard(),
        Some(StandardGate::X90 | StandardGate::XM90)
    ) {
        return Some(vec![instruction.clone()]);
    }

    let angles = gate.unitary()?.universal_angles(tolerance);
    if angles.theta == 0.0 {
        return Some(vec![Instruction::single(
            StandardGate::PhaseShift(angles.lambda),
            qubit,
        )]);
    }
    Some(vec![
        Instruction::single(StandardGate::PhaseShift(normalize(angles.lambda - PI)), qubit),
        Instruction::single(StandardGate::XM90, qubit),
        Instruction::single(StandardGate::PhaseShift(normalize(angles.theta)), qubit),
        Instruction::single(StandardGate::X90, qubit),
        Instruction::single(StandardGate::PhaseShift(normalize(angles.phi + PI)), qubit),
    ])
}

/// `CX(a, b)` as `H(b), CZ(a, b), H(b)`.
pub fn cx_to_cz(control: QubitId, target: QubitId) -> Vec<Instruction> {
    vec![
        Instruction::single(StandardGate::Hadamard, target),
        Instruction::two(StandardGate::ControlZ, control, target),
        Instruction::single(StandardGate::Hadamard, target),
    ]
}

/// `Swap(a, b)` as `CX(a, b), CX(b, a), CX(a, b)`.
pub fn swap_to_cx(a: QubitId, b: QubitId) -> Vec<Instruction> {
    vec![
        Instruction::two(StandardGate::ControlX, a, b),
        Instruction::two(StandardGate::ControlX, b, a),
        Instruction::two(StandardGate::ControlX, a, b),
    ]
}

/// `ISwap(a, b)` as `H(b), CX(b, a), CX(a, b), H(a), S(a), S(b)`.
pub fn iswap_to_cx(a: QubitId, b: QubitId) -> Vec<Instruction> {
    vec![
        Instruction::single(StandardGate::Hadamard, b),
        Instruction::two(StandardGate::ControlX, b, a),
        Instruction::two(StandardGate::ControlX, a, b),
        Instruction::single(StandardGate::Hadamard, a),
        Instruction::single(StandardGate::Phase, a),
        Instruction::single(StandardGate::Phase, b),
    ]
}

/// `ISwapDagger(a, b)`, the [`iswap_to_cx`] sequence reversed and inverted.
pub fn iswap_dagger_to_cx(a: QubitId, b: QubitId) -> Vec<Instruction> {
    vec![
        Instruction::single(StandardGate::PhaseDagger, b),
        Instruction::single(StandardGate::PhaseDagger, a),
        Instruction::single(StandardGate::Hadamard, a),
        Instruction::two(StandardGate::ControlX, a, b),
        Instruction::two(StandardGate::ControlX, b, a),
        Instruction::single(StandardGate::Hadamard, b),
    ]
}

/// Replace every `ControlX` in `instructions` with its `ControlZ` form.
pub fn expand_cx(instructions: Vec<Instruction>) -> Vec<Instruction> {
    instructions
        .into_iter()
        .flat_map(
            |instruction| match (instruction.as_standard(), instruction.qubits.as_slice()) {
                (Some(StandardGate::ControlX), &[control, target]) => cx_to_cz(control, target),
                _ => vec![instruction],
            },
        )
        .collect()
}

/// `Toffoli(c1, c2, t)` as six CX gates with T and T-dagger phases.
pub fn toffoli_to_cx(c1: QubitId, c2: QubitId, target: QubitId) -> Vec<Instruction> {
    use StandardGate::{ControlX, Hadamard, Pi8, Pi8Dagger};
    vec![
        Instruction::single(Hadamard, target),
        Instruction::two(ControlX, c2, target),
        Instruction::single(Pi8Dagger, target),
        Instruction::two(ControlX, c1, target),
        Instruction::single(Pi8, target),
        Instruction::two(ControlX, c2, target),
        Instruction::single(Pi8Dagger, target),
        Instruction::two(ControlX, c1, target),
        Instruction::single(Pi8, c2),
        Instruction::single(Pi8, target),
        Instruction::single(Hadamard, target),
        Instruction::two(ControlX, c1, c2),
        Instruction::single(Pi8, c1),
        Instruction::single(Pi8Dagger, c2),
        Instruction::two(ControlX, c1, c2),
    ]
}

/// A singly controlled single-qubit gate as two `ControlZ` gates.
///
/// With the kernel written as `e^{iα}·Rz(φ)·Ry(θ)·Rz(λ)`, the target
/// receives `C' = H·C`, `B' = H·B·H` and `A' = A·H` around the two `ControlZ`
/// gates, where `A = Rz(φ)·Ry(θ/2)`, `B = Ry(-θ/2)·Rz(-(λ+φ)/2)` and
/// `C = Rz((λ-φ)/2)`. The control picks up `PhaseShift(α + (φ+λ)/2)` when
/// that angle is not negligible.
pub fn controlled_to_cz(
    kernel: &GateKind,
    control: QubitId,
    target: QubitId,
    tolerance: f64,
) -> TranspileResult<Vec<Instruction>> {
    const PASS: &str = "DecomposeControlledGatesTranspiler";

    match kernel.as_standard() {
        Some(StandardGate::SigmaX) => {
            return Err(TranspileError::UnsupportedArgument {
                pass: PASS,
                gate: "controlled(sigma_x)".into(),
                reason: "use control_x instead".into(),
            });
        }
        Some(StandardGate::SigmaZ) => {
            return Err(TranspileError::UnsupportedArgument {
                pass: PASS,
                gate: "controlled(sigma_z)".into(),
                reason: "use control_z instead".into(),
            });
        }
        _ => {}
    }
    let Some(u) = kernel.unitary() else {
        return Err(TranspileError::UnsupportedArgument {
            pass: PASS,
            gate: format!("controlled({})", kernel.name()),
            reason: format!(
                "only single-target kernels are supported, got {} qubits",
                kernel.num_qubits()
            ),
        });
    };

    // The UniversalAngles phase is relative to Universal(θ, φ, λ), which is
    // itself e^{i(φ+λ)/2}·Rz(φ)·Ry(θ)·Rz(λ).
    let angles = u.universal_angles(tolerance);
    let (theta, phi, lambda) = (angles.theta, angles.phi, angles.lambda);
    let alpha = angles.phase + (phi + lambda) / 2.0;

    let h = Unitary2x2::hadamard();
    let a = Unitary2x2::rotation_z(phi) * Unitary2x2::rotation_y(theta / 2.0);
    let b = Unitary2x2::rotation_y(-theta / 2.0) * Unitary2x2::rotation_z(-(lambda + phi) / 2.0);
    let c = Unitary2x2::rotation_z((lambda - phi) / 2.0);

    let a_prime = a * h;
    let b_prime = h * b * h;
    let c_prime = h * c;

    let mut out = vec![
        Instruction::single(universal_from_unitary(&c_prime, tolerance), target),
        Instruction::two(StandardGate::ControlZ, control, target),
        Instruction::single(universal_from_unitary(&b_prime, tolerance), target),
        Instruction::two(StandardGate::ControlZ, control, target),
        Instruction::single(universal_from_unitary(&a_prime, tolerance), target),
    ];

    let control_phase = normalize(alpha);
    if control_phase.abs() > tolerance {
        out.push(Instruction::single(
            StandardGate::PhaseShift(control_phase),
            control,
        ));
    }
    Ok(out)
}
