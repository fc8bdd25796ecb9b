//! A single track block.

/// A half-open position range `[x0, x1)` on one track.
///
/// A block that is not `intact` has failed: no train may move into it from
/// outside, and it is never "free" for occupancy purposes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    pub x0:     f64,
    pub x1:     f64,
    pub intact: bool,
}

impl Block {
    #[inline]
    pub fn new(x0: f64, x1: f64) -> Self {
        Self { x0, x1, intact: true }
    }

    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.x0 && x < self.x1
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.x1 - self.x0
    }
}
