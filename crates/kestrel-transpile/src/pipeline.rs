//! The standard pipeline for a device.

use tracing::debug;

use kestrel_ir::DEFAULT_TOLERANCE;

use crate::config::TranspilerConfig;
use crate::connectivity::Connectivity;
use crate::error::TranspileResult;
use crate::native::NativeGateSet;
use crate::passes::{
    CastCXToCZGateTranspiler, CastISwapToCZGateTranspiler, CastSwapToCZGateTranspiler,
    CastToPhaseShiftAndHalfRotationXTranspiler, CastToffoliToCXGateTranspiler,
    CompressRzGatesTranspiler, CompressSingleQubitGatesTranspiler,
    DecomposeControlledGatesTranspiler, ReadoutsAreFinalInstructionsTranspiler,
    ReadoutsDoNotConflictTranspiler, RejectNonNativeInstructionsTranspiler,
    SimplifyRzGatesTranspiler, SimplifyTrivialGatesTranspiler, SwapQubitsForAdjacencyTranspiler,
    UnsupportedGatesTranspiler,
};
use crate::transpiler::SequentialTranspiler;

/// Builder for the standard pipeline.
///
/// The pipeline validates its input, lowers Toffoli and controlled gates,
/// routes onto the device, casts every two-qubit gate to `ControlZ`,
/// rewrites single-qubit gates over phase shifts and half X rotations, and
/// finally rejects anything the device cannot run.
///
/// # Example
///
/// ```rust
/// use kestrel_ir::QuantumCircuit;
/// use kestrel_transpile::{Connectivity, PipelineBuilder, Transpiler};
///
/// let pipeline = PipelineBuilder::new(Connectivity::line(5)).build();
/// let native = pipeline.transpile(&QuantumCircuit::ghz(5).unwrap()).unwrap();
/// assert!(native.instructions().all(|i| i.name() != "control_x"));
/// ```
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    connectivity: Connectivity,
    native_gates: NativeGateSet,
    tolerance: f64,
    restore_layout: bool,
}

impl PipelineBuilder {
    /// Pipeline for `connectivity` with the phase-shift/CZ native set.
    pub fn new(connectivity: Connectivity) -> Self {
        Self {
            connectivity,
            native_gates: NativeGateSet::phase_shift_cz(),
            tolerance: DEFAULT_TOLERANCE,
            restore_layout: true,
        }
    }

    /// Pipeline described by a configuration file.
    pub fn from_config(config: &TranspilerConfig) -> TranspileResult<Self> {
        config.validate()?;
        let mut builder = Self::new(config.connectivity()?)
            .with_native_gates(config.native_gate_set())
            .with_restore_layout(config.restore_layout);
        if let Some(tolerance) = config.tolerance {
            builder = builder.with_tolerance(tolerance);
        }
        Ok(builder)
    }

    /// Set the native gate set checked by the final pass.
    #[must_use]
    pub fn with_native_gates(mut self, native_gates: NativeGateSet) -> Self {
        self.native_gates = native_gates;
        self
    }

    /// Set the numeric tolerance of every tolerance-aware pass.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Whether routing undoes its swaps after each gate.
    #[must_use]
    pub fn with_restore_layout(mut self, restore: bool) -> Self {
        self.restore_layout = restore;
        self
    }

    /// Get the target connectivity.
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Build the pipeline.
    pub fn build(self) -> SequentialTranspiler {
        let tolerance = self.tolerance;
        let mut routing = SwapQubitsForAdjacencyTranspiler::new(self.connectivity.clone());
        if !self.restore_layout {
            routing = routing.without_restore();
        }

        let pipeline = SequentialTranspiler::new()
            .with(UnsupportedGatesTranspiler)
            .with(ReadoutsDoNotConflictTranspiler)
            .with(ReadoutsAreFinalInstructionsTranspiler)
            .with(CastToffoliToCXGateTranspiler)
            .with(DecomposeControlledGatesTranspiler::new().with_tolerance(tolerance))
            .with(routing)
            .with(CastSwapToCZGateTranspiler)
            .with(CastISwapToCZGateTranspiler)
            .with(CastCXToCZGateTranspiler)
            .with(CompressSingleQubitGatesTranspiler::new().with_tolerance(tolerance))
            .with(CastToPhaseShiftAndHalfRotationXTranspiler::new().with_tolerance(tolerance))
            .with(CompressRzGatesTranspiler)
            .with(SimplifyRzGatesTranspiler::new().with_tolerance(tolerance))
            .with(SimplifyTrivialGatesTranspiler::new().with_tolerance(tolerance))
            .with(RejectNonNativeInstructionsTranspiler::new(
                self.connectivity,
                self.native_gates,
            ));
        debug!("Built standard pipeline with {} passes", pipeline.len());
        pipeline
    }
}
