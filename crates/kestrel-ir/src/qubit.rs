//! Qubit and classical bit identifiers.
//!
//! Identifiers are 1-based: the first qubit of a circuit is `QubitId(1)`.
//! The wire format and the dense engine convert to 0-based indices through
//! [`QubitId::index`] and [`QubitId::from_index`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a qubit within a circuit or on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// 0-based index of this qubit.
    ///
    /// `QubitId(0)` is never valid inside a circuit; it maps to `usize::MAX`
    /// so that any bounds check on the result fails.
    #[inline]
    pub fn index(self) -> usize {
        (self.0 as usize).wrapping_sub(1)
    }

    /// Build an identifier from a 0-based index.
    #[inline]
    pub fn from_index(index: u32) -> Self {
        QubitId(index.saturating_add(1))
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Classical bit receiving a readout result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BitId(pub u32);

impl BitId {
    /// 0-based index of this bit.
    #[inline]
    pub fn index(self) -> usize {
        (self.0 as usize).wrapping_sub(1)
    }

    /// Build an identifier from a 0-based index.
    #[inline]
    pub fn from_index(index: u32) -> Self {
        BitId(index.saturating_add(1))
    }
}

impl fmt::Display for BitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for BitId {
    fn from(id: u32) -> Self {
        BitId(id)
    }
}
