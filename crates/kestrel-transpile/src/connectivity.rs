//! Device qubit connectivity.
//!
//! A [`Connectivity`] describes which pairs of device positions can be the
//! operands of a multi-qubit gate. Positions are 1-based, matching
//! [`QubitId`]. Excluded positions and couplers are removed from the graph
//! and are never traversed by path queries.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use kestrel_ir::QubitId;
use petgraph::algo::dijkstra;
use petgraph::graphmap::UnGraphMap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{TranspileError, TranspileResult};

/// Shape of the coupling graph before exclusions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every pair of positions is coupled.
    AllToAll,
    /// Positions `i` and `i + 1` are coupled.
    Line,
    /// Row-major grid; position `r * cols + c + 1` is row `r`, column `c`.
    Lattice { rows: u32, cols: u32 },
}

/// Qubit adjacency of a target device.
#[derive(Debug, Clone)]
pub struct Connectivity {
    topology: Topology,
    qubit_count: u32,
    excluded_qubits: BTreeSet<QubitId>,
    excluded_couplers: BTreeSet<(QubitId, QubitId)>,
    graph: UnGraphMap<u32, ()>,
}

fn coupler(a: QubitId, b: QubitId) -> (QubitId, QubitId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Connectivity {
    fn with_topology(topology: Topology, qubit_count: u32) -> Self {
        let mut connectivity = Self {
            topology,
            qubit_count,
            excluded_qubits: BTreeSet::new(),
            excluded_couplers: BTreeSet::new(),
            graph: UnGraphMap::new(),
        };
        connectivity.rebuild_graph();
        connectivity
    }

    /// Every pair of the `n` positions is coupled.
    pub fn all_to_all(n: u32) -> Self {
        Self::with_topology(Topology::AllToAll, n)
    }

    /// A chain `1 - 2 - ... - n`.
    pub fn line(n: u32) -> Self {
        Self::with_topology(Topology::Line, n)
    }

    /// A `rows x cols` grid with nearest-neighbour couplers.
    pub fn lattice(rows: u32, cols: u32) -> Self {
        Self::with_topology(Topology::Lattice { rows, cols }, rows * cols)
    }

    /// Remove positions from the device.
    #[must_use]
    pub fn excluding_qubits(mut self, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        self.excluded_qubits.extend(qubits);
        self.rebuild_graph();
        self
    }

    /// Remove couplers from the device.
    #[must_use]
    pub fn excluding_couplers(
        mut self,
        couplers: impl IntoIterator<Item = (QubitId, QubitId)>,
    ) -> Self {
        self.excluded_couplers
            .extend(couplers.into_iter().map(|(a, b)| coupler(a, b)));
        self.rebuild_graph();
        self
    }

    fn rebuild_graph(&mut self) {
        let mut graph = UnGraphMap::new();
        let active: Vec<u32> = (1..=self.qubit_count)
            .filter(|q| !self.excluded_qubits.contains(&QubitId(*q)))
            .collect();
        for &q in &active {
            graph.add_node(q);
        }

        let mut edges = Vec::new();
        match self.topology {
            Topology::AllToAll => {
                for (i, &a) in active.iter().enumerate() {
                    for &b in &active[i + 1..] {
                        edges.push((a, b));
                    }
                }
            }
            Topology::Line => {
                edges.extend((1..self.qubit_count).map(|q| (q, q + 1)));
            }
            Topology::Lattice { rows, cols } => {
                for r in 0..rows {
                    for c in 0..cols {
                        let q = r * cols + c + 1;
                        if c + 1 < cols {
                            edges.push((q, q + 1));
                        }
                        if r + 1 < rows {
                            edges.push((q, q + cols));
                        }
                    }
                }
            }
        }

        for (a, b) in edges {
            let blocked = self.excluded_couplers.contains(&(QubitId(a), QubitId(b)));
            if !blocked && graph.contains_node(a) && graph.contains_node(b) {
                graph.add_edge(a, b, ());
            }
        }
        self.graph = graph;
    }

    /// Number of device positions, excluded ones included.
    #[inline]
    pub fn qubit_count(&self) -> u32 {
        self.qubit_count
    }

    /// Shape of the device.
    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Excluded positions in ascending order.
    pub fn excluded_qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.excluded_qubits.iter().copied()
    }

    /// Excluded couplers, each with the lower position first.
    pub fn excluded_couplers(&self) -> impl Iterator<Item = (QubitId, QubitId)> + '_ {
        self.excluded_couplers.iter().copied()
    }

    /// Whether `qubit` exists on the device and is not excluded.
    #[inline]
    pub fn is_active(&self, qubit: QubitId) -> bool {
        self.graph.contains_node(qubit.0)
    }

    /// Whether a two-qubit gate may act on `q1` and `q2`.
    #[inline]
    pub fn adjacent(&self, q1: QubitId, q2: QubitId) -> bool {
        q1 != q2 && self.graph.contains_edge(q1.0, q2.0)
    }

    /// Coupled neighbours of `qubit` in ascending order.
    pub fn neighbours(&self, qubit: QubitId) -> Vec<QubitId> {
        if !self.is_active(qubit) {
            return vec![];
        }
        let mut neighbours: Vec<QubitId> = self.graph.neighbors(qubit.0).map(QubitId).collect();
        neighbours.sort_unstable();
        neighbours
    }

    /// Number of couplers on the shortest path between two positions.
    pub fn distance(&self, q1: QubitId, q2: QubitId) -> TranspileResult<u32> {
        if !self.is_active(q1) || !self.is_active(q2) {
            return Err(self.no_path(q1, q2));
        }
        let costs = dijkstra(&self.graph, q1.0, Some(q2.0), |_| 1u32);
        costs.get(&q2.0).copied().ok_or_else(|| self.no_path(q1, q2))
    }

    /// Positions from `q1` to `q2` inclusive along a shortest path.
    ///
    /// Ties are broken by visiting neighbours in ascending order, so the
    /// result is deterministic.
    pub fn shortest_path(&self, q1: QubitId, q2: QubitId) -> TranspileResult<Vec<QubitId>> {
        self.shortest_path_avoiding(q1, q2, &FxHashSet::default())
    }

    /// Like [`shortest_path`](Self::shortest_path), but never passing
    /// through a `blocked` position. The endpoints themselves may be blocked.
    pub fn shortest_path_avoiding(
        &self,
        q1: QubitId,
        q2: QubitId,
        blocked: &FxHashSet<QubitId>,
    ) -> TranspileResult<Vec<QubitId>> {
        if !self.is_active(q1) || !self.is_active(q2) {
            return Err(self.no_path(q1, q2));
        }
        if q1 == q2 {
            return Ok(vec![q1]);
        }

        let mut previous: FxHashMap<QubitId, QubitId> = FxHashMap::default();
        let mut queue = VecDeque::from([q1]);
        previous.insert(q1, q1);

        while let Some(current) = queue.pop_front() {
            for next in self.neighbours(current) {
                if previous.contains_key(&next) {
                    continue;
                }
                if next != q2 && blocked.contains(&next) {
                    continue;
                }
                previous.insert(next, current);
                if next == q2 {
                    let mut path = vec![q2];
                    let mut at = q2;
                    while at != q1 {
                        at = previous[&at];
                        path.push(at);
                    }
                    path.reverse();
                    return Ok(path);
                }
                queue.push_back(next);
            }
        }

        Err(self.no_path(q1, q2))
    }

    /// Whether `qubits` induce a connected subgraph of active positions.
    ///
    /// A two-qubit set is connected exactly when its members are adjacent.
    pub fn is_connected_set(&self, qubits: &[QubitId]) -> bool {
        let Some(&first) = qubits.first() else {
            return true;
        };
        if qubits.iter().any(|q| !self.is_active(*q)) {
            return false;
        }

        let members: FxHashSet<QubitId> = qubits.iter().copied().collect();
        let mut reached = FxHashSet::default();
        let mut stack = vec![first];
        reached.insert(first);
        while let Some(current) = stack.pop() {
            for next in self.graph.neighbors(current.0).map(QubitId) {
                if members.contains(&next) && reached.insert(next) {
                    stack.push(next);
                }
            }
        }
        reached.len() == members.len()
    }

    /// Short name used in error messages, e.g. `line(10)`.
    pub fn label(&self) -> String {
        match self.topology {
            Topology::AllToAll => format!("all-to-all({})", self.qubit_count),
            Topology::Line => format!("line({})", self.qubit_count),
            Topology::Lattice { rows, cols } => format!("lattice({rows}x{cols})"),
        }
    }

    fn no_path(&self, from: QubitId, to: QubitId) -> TranspileError {
        TranspileError::NoPath {
            from,
            to,
            connectivity: self.label(),
        }
    }

    /// Build a connectivity from its serialized description.
    pub fn from_description(description: &ConnectivityDescription) -> TranspileResult<Self> {
        let n = description.qubit_count;
        let base = match description.connectivity_type {
            ConnectivityType::AllToAll => Self::all_to_all(n),
            ConnectivityType::Line => Self::line(n),
            ConnectivityType::Lattice => {
                let (Some(rows), Some(cols)) = (description.rows, description.cols) else {
                    return Err(TranspileError::InvalidConfiguration(
                        "lattice connectivity needs both 'rows' and 'cols'".into(),
                    ));
                };
                if rows.checked_mul(cols) != Some(n) {
                    return Err(TranspileError::InvalidConfiguration(format!(
                        "lattice of {rows}x{cols} does not hold {n} qubits"
                    )));
                }
                Self::lattice(rows, cols)
            }
        };

        let in_range = |q: u32| (1..=n).contains(&q);
        if let Some(q) = description
            .excluded_positions
            .iter()
            .find(|q| !in_range(**q))
        {
            return Err(TranspileError::InvalidConfiguration(format!(
                "excluded position {q} is outside 1..={n}"
            )));
        }
        if let Some([a, b]) = description
            .excluded_couplers
            .iter()
            .find(|[a, b]| !in_range(*a) || !in_range(*b) || a == b)
        {
            return Err(TranspileError::InvalidConfiguration(format!(
                "excluded coupler [{a}, {b}] is not a pair of positions in 1..={n}"
            )));
        }

        Ok(base
            .excluding_qubits(description.excluded_positions.iter().map(|q| QubitId(*q)))
            .excluding_couplers(
                description
                    .excluded_couplers
                    .iter()
                    .map(|[a, b]| (QubitId(*a), QubitId(*b))),
            ))
    }

    /// Serializable description of this connectivity.
    pub fn to_description(&self) -> ConnectivityDescription {
        let (connectivity_type, rows, cols) = match self.topology {
            Topology::AllToAll => (ConnectivityType::AllToAll, None, None),
            Topology::Line => (ConnectivityType::Line, None, None),
            Topology::Lattice { rows, cols } => (ConnectivityType::Lattice, Some(rows), Some(cols)),
        };
        ConnectivityDescription {
            qubit_count: self.qubit_count,
            connectivity_type,
            excluded_positions: self.excluded_qubits.iter().map(|q| q.0).collect(),
            excluded_couplers: self
                .excluded_couplers
                .iter()
                .map(|(a, b)| [a.0, b.0])
                .collect(),
            rows,
            cols,
        }
    }
}

impl fmt::Display for Connectivity {
    /// Lines and lattices are drawn as grids; excluded positions show as `x`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = match self.topology {
            Topology::AllToAll => {
                write!(f, "{}", self.label())?;
                if !self.excluded_qubits.is_empty() {
                    let excluded: Vec<String> =
                        self.excluded_qubits.iter().map(ToString::to_string).collect();
                    write!(f, " without {}", excluded.join(", "))?;
                }
                return Ok(());
            }
            Topology::Line => (1, self.qubit_count),
            Topology::Lattice { rows, cols } => (rows, cols),
        };

        let width = self.qubit_count.to_string().len();
        let cell = |q: u32| {
            if self.is_active(QubitId(q)) {
                format!("{q:>width$}")
            } else {
                format!("{:>width$}", "x")
            }
        };

        let mut lines = Vec::new();
        for r in 0..rows {
            let mut line = String::new();
            for c in 0..cols {
                let q = r * cols + c + 1;
                line.push_str(&cell(q));
                if c + 1 < cols {
                    let link = self.adjacent(QubitId(q), QubitId(q + 1));
                    line.push_str(if link { " - " } else { "   " });
                }
            }
            lines.push(line.trim_end().to_string());

            if r + 1 < rows {
                let mut spacer = String::new();
                for c in 0..cols {
                    let q = r * cols + c + 1;
                    let link = self.adjacent(QubitId(q), QubitId(q + cols));
                    spacer.push_str(&format!("{:>width$}", if link { "|" } else { " " }));
                    if c + 1 < cols {
                        spacer.push_str("   ");
                    }
                }
                lines.push(spacer.trim_end().to_string());
            }
        }
        f.write_str(&lines.join("\n"))
    }
}

/// Kind of connectivity in a device description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectivityType {
    /// Fully connected.
    AllToAll,
    /// Nearest-neighbour chain.
    Line,
    /// Nearest-neighbour grid.
    Lattice,
}

/// Serialized device connectivity, positions 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectivityDescription {
    /// Number of device positions.
    pub qubit_count: u32,
    /// Shape of the coupling graph.
    pub connectivity_type: ConnectivityType,
    /// Positions removed from the device.
    #[serde(default)]
    pub excluded_positions: Vec<u32>,
    /// Couplers removed from the device.
    #[serde(default)]
    pub excluded_couplers: Vec<[u32; 2]>,
    /// Lattice rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// Lattice columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cols: Option<u32>,
}
