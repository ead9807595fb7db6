//! The transpiler trait and sequential composition.

use tracing::{debug, info, instrument};

use kestrel_ir::QuantumCircuit;

use crate::error::TranspileResult;

/// The kind of a transpiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Checks the circuit and returns it unchanged, or fails.
    Analysis,
    /// Returns a rewritten circuit.
    Transformation,
}

/// A pure circuit rewrite.
///
/// Implementations never mutate their input. The output acts like the input
/// up to a global phase and keeps its name, qubit count and bit count, with
/// the exception of routing, which may widen the qubit count.
pub trait Transpiler: Send + Sync {
    /// Get the name of this transpiler.
    fn name(&self) -> &str;

    /// Get the kind of this transpiler.
    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    /// Rewrite `circuit`.
    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit>;
}

impl<T: Transpiler + ?Sized> Transpiler for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn kind(&self) -> PassKind {
        (**self).kind()
    }

    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        (**self).transpile(circuit)
    }
}

/// Runs child transpilers in order, feeding each the previous output.
#[derive(Default)]
pub struct SequentialTranspiler {
    transpilers: Vec<Box<dyn Transpiler>>,
}

impl SequentialTranspiler {
    /// Create an empty sequence, which returns its input unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transpiler, builder style.
    #[must_use]
    pub fn with(mut self, transpiler: impl Transpiler + 'static) -> Self {
        self.add(transpiler);
        self
    }

    /// Append a transpiler.
    pub fn add(&mut self, transpiler: impl Transpiler + 'static) {
        self.transpilers.push(Box::new(transpiler));
    }

    /// Names of the children in order.
    pub fn names(&self) -> Vec<&str> {
        self.transpilers.iter().map(|t| t.name()).collect()
    }

    /// Get the number of children.
    pub fn len(&self) -> usize {
        self.transpilers.len()
    }

    /// Check if the sequence has no children.
    pub fn is_empty(&self) -> bool {
        self.transpilers.is_empty()
    }
}

impl Transpiler for SequentialTranspiler {
    fn name(&self) -> &str {
        "sequential"
    }

    #[instrument(skip_all, fields(passes = self.transpilers.len()))]
    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        info!(
            "Transpiling circuit with {} qubits and {} instructions through {} passes",
            circuit.qubit_count(),
            circuit.num_instructions(),
            self.transpilers.len()
        );

        let mut current = circuit.clone();
        for transpiler in &self.transpilers {
            debug!("Running pass: {}", transpiler.name());
            current = transpiler.transpile(&current)?;
            debug!(
                "Pass {} completed, instructions: {}",
                transpiler.name(),
                current.num_instructions()
            );
        }

        info!(
            "Transpilation completed, final depth: {}, instructions: {}",
            current.depth(),
            current.num_instructions()
        );
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_ir::QubitId;

    struct Doubler;

    impl Transpiler for Doubler {
        fn name(&self) -> &'static str {
            "doubler"
        }

        fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
            let instructions: Vec<_> = circuit
                .instructions()
                .flat_map(|i| [i.clone(), i.clone()])
                .collect();
            Ok(circuit.rebuild(instructions)?)
        }
    }

    #[test]
    fn test_empty_sequence_is_identity() {
        let pipeline = SequentialTranspiler::new();
        assert!(pipeline.is_empty());

        let circuit = QuantumCircuit::bell().unwrap();
        assert_eq!(pipeline.transpile(&circuit).unwrap(), circuit);
    }

    #[test]
    fn test_children_run_in_order() {
        let pipeline = SequentialTranspiler::new().with(Doubler).with(Doubler);
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.names(), vec!["doubler", "doubler"]);
        assert_eq!(pipeline.kind(), PassKind::Transformation);

        let mut circuit = QuantumCircuit::new(1, 0);
        circuit.h(QubitId(1)).unwrap();
        let out = pipeline.transpile(&circuit).unwrap();
        assert_eq!(out.num_instructions(), 4);
        assert_eq!(circuit.num_instructions(), 1);
    }
}
