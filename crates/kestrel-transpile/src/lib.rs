//! Kestrel Transpilation Framework
//!
//! This crate rewrites [`QuantumCircuit`](kestrel_ir::QuantumCircuit)s so
//! they run on a target device: only native gates, and multi-qubit gates
//! only on coupled qubits. Every pass is a pure function from circuit to
//! circuit that preserves the circuit's action up to a global phase.
//!
//! # Overview
//!
//! ```text
//! Input Circuit
//!       |
//!       v
//! +---------------------+
//! | SequentialTranspiler| <-- Connectivity, NativeGateSet
//! +---------------------+
//!       |
//!       |-- validation: UnsupportedGates, ReadoutsDoNotConflict, ReadoutsAreFinal
//!       |-- lowering:   CastToffoliToCX, DecomposeControlledGates
//!       |-- routing:    SwapQubitsForAdjacency
//!       |-- casts:      CastSwapToCZ, CastISwapToCZ, CastCXToCZ
//!       |-- 1q rewrite: CompressSingleQubitGates, CastToPhaseShiftAndHalfRotationX
//!       |-- cleanup:    CompressRzGates, SimplifyRzGates, SimplifyTrivialGates
//!       `-- check:      RejectNonNativeInstructions
//!       |
//!       v
//! Output Circuit (native, adjacent)
//! ```
//!
//! # Example: Transpiling for a Line Device
//!
//! ```rust
//! use kestrel_ir::QuantumCircuit;
//! use kestrel_transpile::{Connectivity, PipelineBuilder, Transpiler, compare_circuits};
//!
//! let circuit = QuantumCircuit::ghz(4).unwrap();
//! let device = Connectivity::line(4);
//!
//! let pipeline = PipelineBuilder::new(device.clone()).build();
//! let native = pipeline.transpile(&circuit).unwrap();
//!
//! assert!(compare_circuits(&circuit, &native).unwrap());
//! ```
//!
//! # Custom Passes
//!
//! Implement the [`Transpiler`] trait and chain passes with a
//! [`SequentialTranspiler`]:
//!
//! ```rust
//! use kestrel_ir::QuantumCircuit;
//! use kestrel_transpile::{
//!     CompressSingleQubitGatesTranspiler, SequentialTranspiler, TranspileResult, Transpiler,
//! };
//!
//! struct DropEverything;
//!
//! impl Transpiler for DropEverything {
//!     fn name(&self) -> &str { "drop_everything" }
//!
//!     fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
//!         Ok(circuit.rebuild([])?)
//!     }
//! }
//!
//! let pipeline = SequentialTranspiler::new()
//!     .with(CompressSingleQubitGatesTranspiler::new())
//!     .with(DropEverything);
//! let out = pipeline.transpile(&QuantumCircuit::bell().unwrap()).unwrap();
//! assert!(out.is_empty());
//! ```

pub mod config;
pub mod connectivity;
pub mod decompose;
pub mod equivalence;
pub mod error;
pub mod layout;
pub mod native;
pub mod passes;
pub mod pipeline;
pub mod transpiler;

pub use config::TranspilerConfig;
pub use connectivity::{Connectivity, ConnectivityDescription, ConnectivityType, Topology};
pub use equivalence::{EQUIVALENCE_TOLERANCE, compare_circuits, compare_circuits_with_tolerance};
pub use error::{TranspileError, TranspileResult};
pub use layout::Layout;
pub use native::NativeGateSet;
pub use passes::*;
pub use pipeline::PipelineBuilder;
pub use transpiler::{PassKind, SequentialTranspiler, Transpiler};
