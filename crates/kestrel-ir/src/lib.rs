//! Kestrel Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits in Kestrel. It forms the foundation of the transpilation stack.
//!
//! # Overview
//!
//! A [`QuantumCircuit`] is an ordered sequence of steps. Each step is a set
//! of [`Instruction`]s acting on disjoint qubits, issued in logical parallel.
//! Qubits and classical bits are addressed by 1-based [`QubitId`] and
//! [`BitId`] values.
//!
//! # Core Components
//!
//! - **Gates**: [`StandardGate`] for built-in gates and [`CustomGate`] for
//!   user-defined operations, unified by [`GateKind`]
//! - **Instructions**: [`Instruction`] combining a gate or readout with operands
//! - **Circuit**: [`QuantumCircuit`] with step packing, inversion and diagrams
//! - **Numerics**: [`Unitary2x2`] for single-qubit algebra, and the dense
//!   [`operator`] engine for state vectors and circuit unitaries
//! - **Pauli group**: [`PauliGroupElement`] in symplectic form
//! - **Serialization**: [`SymbolRegistry`] and the [`wire`] format
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use kestrel_ir::{QuantumCircuit, QubitId, simulate};
//!
//! let mut circuit = QuantumCircuit::new(2, 2).with_name("bell_state");
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(1)).unwrap();
//! circuit.cx(QubitId(1), QubitId(2)).unwrap();
//! circuit.readout_all().unwrap();
//!
//! assert_eq!(circuit.depth(), 3); // H, CX, parallel readouts
//!
//! let state = simulate(&circuit).unwrap();
//! let p = state.probabilities();
//! assert!((p[0] - 0.5).abs() < 1e-12 && (p[3] - 0.5).abs() < 1e-12);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `Identity`, `SigmaX`, `SigmaY`, `SigmaZ` | 1 | Pauli gates |
//! | `Hadamard` | 1 | Hadamard gate |
//! | `Phase`, `PhaseDagger`, `Pi8`, `Pi8Dagger` | 1 | S, S†, T, T† |
//! | `X90`, `XM90`, `Y90`, `YM90`, `Z90`, `ZM90` | 1 | Half rotations |
//! | `RotationX`, `RotationY`, `RotationZ` | 1 | Axis rotations |
//! | `PhaseShift` | 1 | `diag(1, e^{iφ})` |
//! | `Rotation` | 1 | Equatorial-axis rotation R(θ, φ) |
//! | `Universal` | 1 | U(θ, φ, λ) |
//! | `ControlZ`, `ControlX`, `Swap`, `ISwap`, `ISwapDagger` | 2 | Two-qubit gates |
//! | `Toffoli` | 3 | CCX |
//! | `Controlled` | n | Any gate with extra control qubits |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod operator;
pub mod pauli;
pub mod qubit;
pub mod registry;
mod render;
pub mod unitary;
pub mod wire;

pub use circuit::QuantumCircuit;
pub use error::{ErrorKind, IrError, IrResult};
pub use gate::{CustomGate, GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use operator::{
    MAX_DENSE_QUBITS, Operator, StateVector, circuit_unitary, equal_up_to_global_phase, simulate,
};
pub use pauli::PauliGroupElement;
pub use qubit::{BitId, QubitId};
pub use registry::{GateSymbols, SymbolRegistry};
pub use unitary::{DEFAULT_TOLERANCE, UniversalAngles, Unitary2x2};
pub use wire::{CircuitDocument, JobPayload, WireInstruction};
