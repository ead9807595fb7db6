//! Error types for the transpilation crate.

use std::path::PathBuf;

use kestrel_ir::{BitId, ErrorKind, IrError, QubitId};
use thiserror::Error;

/// Errors that can occur during transpilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranspileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// Gate kind is not part of the device's native set.
    #[error("Gate '{gate}' on {qubits:?} is not native to the device")]
    NonNativeGate { gate: String, qubits: Vec<QubitId> },

    /// Multi-qubit gate on qubits that are not coupled.
    #[error("Gate '{gate}' acts on {qubits:?}, which are not adjacent on {connectivity}")]
    NotAdjacent {
        gate: String,
        qubits: Vec<QubitId>,
        connectivity: String,
    },

    /// Circuit needs more qubits than the device offers.
    #[error("Circuit requires {required} qubits but the device only has {available}")]
    CircuitTooLarge { required: u32, available: u32 },

    /// Instruction addresses a qubit the device does not have or has excluded.
    #[error("Gate '{gate}' uses {qubit}, which is not an active device qubit")]
    QubitOutsideDevice { gate: String, qubit: QubitId },

    /// Two readouts write the same classical bit.
    #[error("Classical bit {bit} is written by readouts of {first} and {second}")]
    ConflictingReadouts {
        bit: BitId,
        first: QubitId,
        second: QubitId,
    },

    /// A pass received a gate it cannot handle in this form.
    #[error("{pass} cannot handle '{gate}': {reason}")]
    UnsupportedArgument {
        pass: &'static str,
        gate: String,
        reason: String,
    },

    /// Readout is followed by further operations on the same qubit.
    #[error("Readout of {qubit} is not terminal; equivalence is only defined for final readouts")]
    NonTerminalReadout { qubit: QubitId },

    /// Operation is not available for this gate.
    #[error("{pass} does not support '{gate}'")]
    NotImplemented { pass: &'static str, gate: String },

    /// A gate follows a readout on the same qubit.
    #[error("Gate '{gate}' follows the readout of {qubit}")]
    ReadoutNotFinal { qubit: QubitId, gate: String },

    /// No path connects two qubits on the device.
    #[error("No path from {from} to {to} on {connectivity}")]
    NoPath {
        from: QubitId,
        to: QubitId,
        connectivity: String,
    },

    /// Invalid transpiler or device configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Configuration file could not be read.
    #[error("Cannot read configuration {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration text could not be parsed.
    #[error("Cannot parse configuration: {0}")]
    ConfigParse(String),
}

impl TranspileError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranspileError::Ir(e) => e.kind(),
            TranspileError::NonNativeGate { .. }
            | TranspileError::NotAdjacent { .. }
            | TranspileError::CircuitTooLarge { .. }
            | TranspileError::QubitOutsideDevice { .. } => ErrorKind::Domain,
            TranspileError::ConflictingReadouts { .. }
            | TranspileError::UnsupportedArgument { .. }
            | TranspileError::NonTerminalReadout { .. } => ErrorKind::Argument,
            TranspileError::NotImplemented { .. } => ErrorKind::NotImplemented,
            TranspileError::ReadoutNotFinal { .. } | TranspileError::NoPath { .. } => {
                ErrorKind::Assertion
            }
            TranspileError::InvalidConfiguration(_)
            | TranspileError::ConfigIo { .. }
            | TranspileError::ConfigParse(_) => ErrorKind::Config,
        }
    }
}

impl From<serde_json::Error> for TranspileError {
    fn from(e: serde_json::Error) -> Self {
        TranspileError::ConfigParse(e.to_string())
    }
}

impl From<serde_yaml_ng::Error> for TranspileError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        TranspileError::ConfigParse(e.to_string())
    }
}

/// Result type for transpilation operations.
pub type TranspileResult<T> = Result<T, TranspileError>;
