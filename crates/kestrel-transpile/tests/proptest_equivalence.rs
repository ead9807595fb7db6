//! Property-based tests: transpilation preserves the circuit's action.
//!
//! Random circuits over the full gate vocabulary go through the standard
//! pipeline and through routing alone; every output must be equivalent to
//! its input up to a global phase.

use std::f64::consts::PI;

use kestrel_ir::{Instruction, QuantumCircuit, QubitId, StandardGate};
use kestrel_transpile::{
    CompressSingleQubitGatesTranspiler, Connectivity, PipelineBuilder,
    SwapQubitsForAdjacencyTranspiler, Transpiler, compare_circuits,
};
use proptest::prelude::*;
use proptest::sample::subsequence;

const QUBITS: u32 = 4;

/// Gate operations drawn for a circuit, qubits 1-based.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    T(u32),
    Rx(f64, u32),
    Ry(f64, u32),
    U(f64, f64, f64, u32),
    CX(u32, u32),
    CZ(u32, u32),
    Swap(u32, u32),
    ISwap(u32, u32),
    ControlledRy(f64, u32, u32),
    Toffoli(u32, u32, u32),
}

impl GateOp {
    fn instruction(&self) -> Instruction {
        let q = QubitId;
        match *self {
            GateOp::H(a) => Instruction::single(StandardGate::Hadamard, q(a)),
            GateOp::T(a) => Instruction::single(StandardGate::Pi8, q(a)),
            GateOp::Rx(theta, a) => Instruction::single(StandardGate::RotationX(theta), q(a)),
            GateOp::Ry(theta, a) => Instruction::single(StandardGate::RotationY(theta), q(a)),
            GateOp::U(theta, phi, lambda, a) => {
                Instruction::single(StandardGate::Universal(theta, phi, lambda), q(a))
            }
            GateOp::CX(a, b) => Instruction::two(StandardGate::ControlX, q(a), q(b)),
            GateOp::CZ(a, b) => Instruction::two(StandardGate::ControlZ, q(a), q(b)),
            GateOp::Swap(a, b) => Instruction::two(StandardGate::Swap, q(a), q(b)),
            GateOp::ISwap(a, b) => Instruction::two(StandardGate::ISwap, q(a), q(b)),
            GateOp::ControlledRy(theta, c, t) => Instruction::controlled(
                Instruction::single(StandardGate::RotationY(theta), q(t)),
                [q(c)],
            )
            .unwrap(),
            GateOp::Toffoli(a, b, c) => {
                Instruction::three(StandardGate::Toffoli, q(a), q(b), q(c))
            }
        }
    }
}

fn angle() -> impl Strategy<Value = f64> {
    -PI..PI
}

fn qubit() -> impl Strategy<Value = u32> {
    1..=QUBITS
}

/// Two distinct qubits in random order.
fn pair() -> impl Strategy<Value = (u32, u32)> {
    subsequence((1..=QUBITS).collect::<Vec<_>>(), 2)
        .prop_shuffle()
        .prop_map(|v| (v[0], v[1]))
}

fn arb_gate_op() -> impl Strategy<Value = GateOp> {
    prop_oneof![
        qubit().prop_map(GateOp::H),
        qubit().prop_map(GateOp::T),
        (angle(), qubit()).prop_map(|(t, a)| GateOp::Rx(t, a)),
        (angle(), qubit()).prop_map(|(t, a)| GateOp::Ry(t, a)),
        (angle(), angle(), angle(), qubit()).prop_map(|(t, p, l, a)| GateOp::U(t, p, l, a)),
        pair().prop_map(|(a, b)| GateOp::CX(a, b)),
        pair().prop_map(|(a, b)| GateOp::CZ(a, b)),
        pair().prop_map(|(a, b)| GateOp::Swap(a, b)),
        pair().prop_map(|(a, b)| GateOp::ISwap(a, b)),
        (angle(), pair()).prop_map(|(t, (c, g))| GateOp::ControlledRy(t, c, g)),
        subsequence((1..=QUBITS).collect::<Vec<_>>(), 3)
            .prop_shuffle()
            .prop_map(|v| GateOp::Toffoli(v[0], v[1], v[2])),
    ]
}

/// A random circuit on [`QUBITS`] qubits, optionally read out at the end.
fn arb_circuit() -> impl Strategy<Value = QuantumCircuit> {
    (prop::collection::vec(arb_gate_op(), 1..=12), any::<bool>()).prop_map(|(ops, read)| {
        let mut circuit =
            QuantumCircuit::from_instructions(QUBITS, QUBITS, ops.iter().map(GateOp::instruction))
                .unwrap();
        if read {
            circuit.readout_all().unwrap();
        }
        circuit
    })
}

fn devices() -> Vec<Connectivity> {
    vec![
        Connectivity::line(QUBITS),
        Connectivity::lattice(2, 2),
        Connectivity::lattice(2, 3).excluding_couplers([(QubitId(2), QubitId(3))]),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// The standard pipeline preserves equivalence on every device.
    #[test]
    fn test_pipeline_preserves_equivalence(circuit in arb_circuit()) {
        for device in devices() {
            let out = PipelineBuilder::new(device.clone())
                .build()
                .transpile(&circuit)
                .unwrap();
            prop_assert!(
                compare_circuits(&circuit, &out).unwrap(),
                "not equivalent on {}",
                device.label()
            );
        }
    }

    /// Routing alone preserves equivalence and only leaves connected gates.
    #[test]
    fn test_routing_preserves_equivalence(circuit in arb_circuit()) {
        let device = Connectivity::line(QUBITS + 1);
        let out = SwapQubitsForAdjacencyTranspiler::new(device.clone())
            .transpile(&circuit)
            .unwrap();
        prop_assert!(out.qubit_count() >= circuit.qubit_count());
        for instruction in out.instructions() {
            prop_assert!(device.is_connected_set(&instruction.qubits));
        }
        prop_assert!(compare_circuits(&circuit, &out).unwrap());
    }

    /// Compressing an already compressed circuit changes nothing of substance.
    #[test]
    fn test_compression_is_stable(circuit in arb_circuit()) {
        let pass = CompressSingleQubitGatesTranspiler::new();
        let once = pass.transpile(&circuit).unwrap();
        let twice = pass.transpile(&once).unwrap();
        prop_assert_eq!(once.num_instructions(), twice.num_instructions());
        prop_assert!(compare_circuits(&once, &twice).unwrap());
    }
}
