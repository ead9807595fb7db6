//! Built-in transpilation passes.
//!
//! Passes are grouped by what they do:
//! - [`validation`]: checks that return the circuit unchanged or fail
//! - [`cast`]: gate-for-sequence substitutions
//! - [`decomposition`]: controlled gates to `ControlZ` sequences
//! - [`compression`]: merging runs of single-qubit gates
//! - [`simplification`]: dropping and renaming trivial gates
//! - [`routing`]: swap insertion for device connectivity

pub mod cast;
pub mod compression;
pub mod decomposition;
pub mod routing;
pub mod simplification;
pub mod validation;

pub use cast::{
    CastCXToCZGateTranspiler, CastISwapToCZGateTranspiler,
    CastRxToRzAndHalfRotationXTranspiler, CastSwapToCZGateTranspiler,
    CastToPhaseShiftAndHalfRotationXTranspiler, CastToffoliToCXGateTranspiler,
    CastUniversalToRzRxRzTranspiler,
};
pub use compression::{CompressRzGatesTranspiler, CompressSingleQubitGatesTranspiler};
pub use decomposition::{
    DecomposeControlledGatesTranspiler, DecomposeSingleTargetSingleControlGatesTranspiler,
};
pub use routing::{RoutedCircuit, SwapQubitsForAdjacencyTranspiler};
pub use simplification::{
    SimplifyRxGatesTranspiler, SimplifyRzGatesTranspiler, SimplifyTrivialGatesTranspiler,
};
pub use validation::{
    ReadoutsAreFinalInstructionsTranspiler, ReadoutsDoNotConflictTranspiler,
    RejectNonNativeInstructionsTranspiler, UnsupportedGatesTranspiler,
};

use kestrel_ir::{Instruction, QuantumCircuit};

use crate::error::TranspileResult;

/// Replace every instruction by the sequence `rewrite` returns for it and
/// repack the result into steps.
pub(crate) fn rewrite_each<F>(circuit: &QuantumCircuit, mut rewrite: F) -> TranspileResult<QuantumCircuit>
where
    F: FnMut(&Instruction) -> TranspileResult<Vec<Instruction>>,
{
    let mut out = Vec::with_capacity(circuit.num_instructions());
    for instruction in circuit.instructions() {
        out.extend(rewrite(instruction)?);
    }
    Ok(circuit.rebuild(out)?)
}
