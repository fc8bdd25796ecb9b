//! One track and its block segmentation.

use rail_core::TrackId;

use crate::Block;

/// An ordered, gap-free sequence of blocks.
///
/// Do not construct directly; [`LayoutBuilder`][crate::LayoutBuilder]
/// validates contiguity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    pub id:     TrackId,
    pub blocks: Vec<Block>,
}

impl Track {
    /// Index of the block containing `x`.
    ///
    /// Positions before the first block map to block 0; positions at or past
    /// the last block's upper bound map to the last block, which acts as the
    /// open-ended catch-all.
    pub fn block_index(&self, x: f64) -> usize {
        let last = self.blocks.len().saturating_sub(1);
        if self.blocks.first().is_some_and(|b| x < b.x0) {
            return 0;
        }
        self.blocks.iter().position(|b| b.contains(x)).unwrap_or(last)
    }

    /// `false` for failed blocks and for out-of-range indices.
    #[inline]
    pub fn is_intact(&self, index: usize) -> bool {
        self.blocks.get(index).is_some_and(|b| b.intact)
    }

    #[inline]
    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Iterator over `(index, block)` for every failed block, in position order.
    pub fn failed_blocks(&self) -> impl Iterator<Item = (usize, &Block)> + '_ {
        self.blocks.iter().enumerate().filter(|(_, b)| !b.intact)
    }
}
