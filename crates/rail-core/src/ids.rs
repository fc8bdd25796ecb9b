//! Roster identifiers.
//!
//! A `TrainId` is the train's slot in the roster.  The roster order is also
//! the fixed evaluation order of every simulation step, so ids double as the
//! tie-break for contested blocks.  Human-facing train numbers ("12001") are
//! stored on the train itself.

use std::fmt;

/// Index of a train in the roster.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainId(pub u32);

impl TrainId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainId({})", self.0)
    }
}
