//! Strongly-typed identifiers for interaction entities.
//!
//! Newtype wrappers keep touchable handles and probe handles apart.
//! Touchable ids are dense so they can index per-probe arenas directly.

use serde::{Deserialize, Serialize};

/// Stable handle of a registered touchable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TouchableId(pub u32);

/// Handle of a probe (one per tracked fingertip or controller tip).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProbeId(pub u32);

impl TouchableId {
    /// Returns the raw index as `usize` for arena indexing.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ProbeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for TouchableId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for ProbeId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
