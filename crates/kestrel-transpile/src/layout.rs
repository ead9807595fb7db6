//! Logical to physical qubit placement.

use kestrel_ir::QubitId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A mapping from logical qubits to device positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    logical_to_physical: FxHashMap<QubitId, QubitId>,
    physical_to_logical: FxHashMap<QubitId, QubitId>,
}

impl Layout {
    /// Create a new empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical qubit `i` sits on position `i` for `i` in `1..=n`.
    pub fn trivial(n: u32) -> Self {
        let mut layout = Self::new();
        for i in 1..=n {
            layout.add(QubitId(i), QubitId(i));
        }
        layout
    }

    /// Place `logical` on `physical`.
    ///
    /// Any previous mapping of either qubit is dropped, so both directions
    /// stay consistent.
    pub fn add(&mut self, logical: QubitId, physical: QubitId) {
        if let Some(old_logical) = self.physical_to_logical.insert(physical, logical) {
            if old_logical != logical {
                self.logical_to_physical.remove(&old_logical);
            }
        }
        if let Some(old_physical) = self.logical_to_physical.insert(logical, physical) {
            if old_physical != physical {
                self.physical_to_logical.remove(&old_physical);
            }
        }
    }

    /// Position holding `logical`.
    pub fn physical(&self, logical: QubitId) -> Option<QubitId> {
        self.logical_to_physical.get(&logical).copied()
    }

    /// Logical qubit at position `physical`.
    pub fn logical(&self, physical: QubitId) -> Option<QubitId> {
        self.physical_to_logical.get(&physical).copied()
    }

    /// Exchange the contents of two positions.
    pub fn swap(&mut self, p1: QubitId, p2: QubitId) {
        let l1 = self.physical_to_logical.remove(&p1);
        let l2 = self.physical_to_logical.remove(&p2);
        if let Some(l1) = l1 {
            self.logical_to_physical.insert(l1, p2);
            self.physical_to_logical.insert(p2, l1);
        }
        if let Some(l2) = l2 {
            self.logical_to_physical.insert(l2, p1);
            self.physical_to_logical.insert(p1, l2);
        }
    }

    /// Number of placed logical qubits.
    pub fn len(&self) -> usize {
        self.logical_to_physical.len()
    }

    /// Check if nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.logical_to_physical.is_empty()
    }

    /// Whether every logical qubit sits on the position of the same number.
    pub fn is_trivial(&self) -> bool {
        self.logical_to_physical.iter().all(|(l, p)| l == p)
    }

    /// `(logical, physical)` pairs ordered by logical qubit.
    pub fn iter(&self) -> impl Iterator<Item = (QubitId, QubitId)> {
        let mut pairs: Vec<_> = self
            .logical_to_physical
            .iter()
            .map(|(&l, &p)| (l, p))
            .collect();
        pairs.sort_unstable();
        pairs.into_iter()
    }
}
