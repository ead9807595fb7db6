//! Swap insertion for device connectivity.

use rustc_hash::FxHashSet;
use tracing::debug;

use kestrel_ir::{Instruction, QuantumCircuit, QubitId, StandardGate};

use crate::connectivity::Connectivity;
use crate::error::{TranspileError, TranspileResult};
use crate::layout::Layout;
use crate::transpiler::Transpiler;

/// Output of [`SwapQubitsForAdjacencyTranspiler::route`].
#[derive(Debug, Clone)]
pub struct RoutedCircuit {
    /// The routed circuit on device positions.
    pub circuit: QuantumCircuit,
    /// Where each logical qubit sits once the circuit has run.
    pub layout: Layout,
    swaps: Vec<(QubitId, QubitId)>,
}

impl RoutedCircuit {
    /// Swaps left in effect at the end of the circuit, in order.
    pub fn swaps(&self) -> &[(QubitId, QubitId)] {
        &self.swaps
    }

    /// Swap gates that return every logical qubit to its own position.
    ///
    /// Empty when the layout was restored after each gate.
    pub fn restoring_swaps(&self) -> Vec<Instruction> {
        self.swaps
            .iter()
            .rev()
            .map(|&(a, b)| Instruction::two(StandardGate::Swap, a, b))
            .collect()
    }
}

/// Inserts `Swap` gates so every multi-qubit gate acts on coupled positions.
///
/// For a gate whose qubits are not a connected set, the last qubit anchors a
/// cluster. Each other qubit, in order, travels along the shortest path that
/// avoids the cluster to the nearest cluster member, then joins the cluster.
/// Positions already read out are never traversed.
///
/// By default the swaps are undone right after the gate, so the output acts
/// exactly like the input. [`without_restore`](Self::without_restore) keeps
/// the permutation instead; [`route`](Self::route) then reports it.
#[derive(Debug, Clone)]
pub struct SwapQubitsForAdjacencyTranspiler {
    connectivity: Connectivity,
    restore: bool,
}

impl SwapQubitsForAdjacencyTranspiler {
    /// Route onto `connectivity`, restoring the layout after each gate.
    pub fn new(connectivity: Connectivity) -> Self {
        Self {
            connectivity,
            restore: true,
        }
    }

    /// Leave qubits where the swaps moved them.
    #[must_use]
    pub fn without_restore(mut self) -> Self {
        self.restore = false;
        self
    }

    /// Whether swaps are undone after each gate.
    pub fn restores_layout(&self) -> bool {
        self.restore
    }

    /// Get the target connectivity.
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Route `circuit` and report the final placement of its qubits.
    pub fn route(&self, circuit: &QuantumCircuit) -> TranspileResult<RoutedCircuit> {
        let device = &self.connectivity;
        if circuit.qubit_count() > device.qubit_count() {
            return Err(TranspileError::CircuitTooLarge {
                required: circuit.qubit_count(),
                available: device.qubit_count(),
            });
        }

        let mut layout = Layout::trivial(device.qubit_count());
        let mut read_out: FxHashSet<QubitId> = FxHashSet::default();
        let mut kept_swaps = Vec::new();
        let mut width = circuit.qubit_count();
        let mut out = Vec::with_capacity(circuit.num_instructions());

        for instruction in circuit.instructions() {
            let mut positions = Vec::with_capacity(instruction.qubits.len());
            for &qubit in &instruction.qubits {
                match layout.physical(qubit) {
                    Some(position) if device.is_active(position) => positions.push(position),
                    _ => {
                        return Err(TranspileError::QubitOutsideDevice {
                            gate: instruction.name().to_string(),
                            qubit,
                        });
                    }
                }
            }

            if instruction.is_readout() {
                read_out.extend(positions.iter().copied());
                out.push(instruction.with_qubits(positions));
                continue;
            }

            let swaps = if positions.len() > 1 && !device.is_connected_set(&positions) {
                self.gather(&mut positions, &read_out)?
            } else {
                vec![]
            };
            if !swaps.is_empty() {
                debug!(
                    "Routing {} on {:?} with {} swaps",
                    instruction.name(),
                    instruction.qubits,
                    swaps.len()
                );
            }

            for &(a, b) in &swaps {
                layout.swap(a, b);
                width = width.max(a.0).max(b.0);
                out.push(Instruction::two(StandardGate::Swap, a, b));
            }
            out.push(instruction.with_qubits(positions));

            if self.restore {
                for &(a, b) in swaps.iter().rev() {
                    layout.swap(a, b);
                    out.push(Instruction::two(StandardGate::Swap, a, b));
                }
            } else {
                kept_swaps.extend(swaps);
            }
        }

        Ok(RoutedCircuit {
            circuit: circuit.rebuild_with_width(width, out)?,
            layout,
            swaps: kept_swaps,
        })
    }

    /// Swaps that bring `positions` into one connected cluster, updating
    /// `positions` as qubits move.
    fn gather(
        &self,
        positions: &mut [QubitId],
        read_out: &FxHashSet<QubitId>,
    ) -> TranspileResult<Vec<(QubitId, QubitId)>> {
        let device = &self.connectivity;
        let Some((&anchor, _)) = positions.split_last() else {
            return Ok(vec![]);
        };

        let mut cluster = vec![anchor];
        let mut swaps = Vec::new();
        for i in 0..positions.len() - 1 {
            let current = positions[i];
            if cluster.iter().any(|m| device.adjacent(current, *m)) {
                cluster.push(current);
                continue;
            }

            let blocked: FxHashSet<QubitId> =
                cluster.iter().chain(read_out.iter()).copied().collect();
            let mut best: Option<Vec<QubitId>> = None;
            let mut failure = None;
            for &member in &cluster {
                match device.shortest_path_avoiding(current, member, &blocked) {
                    Ok(path) => {
                        if best.as_ref().is_none_or(|b| path.len() < b.len()) {
                            best = Some(path);
                        }
                    }
                    Err(e) => failure = Some(e),
                }
            }
            let path = match (best, failure) {
                (Some(path), _) => path,
                (None, Some(e)) => return Err(e),
                (None, None) => {
                    return Err(TranspileError::NoPath {
                        from: current,
                        to: anchor,
                        connectivity: device.label(),
                    });
                }
            };
            debug!("Moving {} along {:?}", current, path);

            // Stop one short of the cluster member at the end of the path.
            for step in path[..path.len() - 1].windows(2) {
                let (a, b) = (step[0], step[1]);
                swaps.push((a, b));
                for p in positions.iter_mut() {
                    if *p == a {
                        *p = b;
                    } else if *p == b {
                        *p = a;
                    }
                }
            }
            cluster.push(positions[i]);
        }
        Ok(swaps)
    }
}

impl Transpiler for SwapQubitsForAdjacencyTranspiler {
    fn name(&self) -> &'static str {
        "SwapQubitsForAdjacencyTranspiler"
    }

    /// The routed circuit. Without restoring, its qubits end up permuted as
    /// [`route`](Self::route) reports.
    fn transpile(&self, circuit: &QuantumCircuit) -> TranspileResult<QuantumCircuit> {
        Ok(self.route(circuit)?.circuit)
    }
}
