//! Occupancy index: which blocks and corridors are held by which trains.
//!
//! Occupancy is never stored.  Every query derives it from current train
//! positions, so a decision sees the positions left by earlier movers in
//! the same step.

use rail_core::{TrackId, TrainId};
use rail_track::{Corridor, TrackLayout};

use crate::TrainStore;

/// Read-only occupancy view over a layout and a roster.
#[derive(Clone, Copy)]
pub struct Occupancy<'a> {
    layout: &'a TrackLayout,
    trains: &'a TrainStore,
}

impl<'a> Occupancy<'a> {
    pub fn new(layout: &'a TrackLayout, trains: &'a TrainStore) -> Self {
        Self { layout, trains }
    }

    /// The first train other than `except` on block `index` of `track`.
    pub fn occupant(&self, track: TrackId, index: usize, except: Option<TrainId>) -> Option<TrainId> {
        self.trains
            .iter()
            .filter(|&(id, t)| Some(id) != except && t.track == track)
            .find(|(_, t)| self.layout.block_index(track, t.position) == index)
            .map(|(id, _)| id)
    }

    /// A block is free for `mover` iff it is intact and no other train on
    /// `track` sits in it.
    pub fn is_free(&self, track: TrackId, index: usize, mover: Option<TrainId>) -> bool {
        self.layout.is_intact(track, index) && self.occupant(track, index, mover).is_none()
    }

    /// `true` if any train on `track` is positioned within the corridor range.
    pub fn corridor_occupied(&self, track: TrackId, corridor: &Corridor) -> bool {
        self.trains
            .iter()
            .any(|(_, t)| t.track == track && corridor.covers(t.position))
    }

    /// Every pair of trains sharing a block, as `(first, second, track, block)`.
    ///
    /// Empty whenever the mutual-exclusion invariant holds.
    pub fn conflicts(&self) -> Vec<(TrainId, TrainId, TrackId, usize)> {
        let placed: Vec<_> = self
            .trains
            .iter()
            .map(|(id, t)| (id, t.track, self.layout.block_index(t.track, t.position)))
            .collect();

        let mut out = Vec::new();
        for (i, &(a, track_a, block_a)) in placed.iter().enumerate() {
            for &(b, track_b, block_b) in &placed[i + 1..] {
                if track_a == track_b && block_a == block_b {
                    out.push((a, b, track_a, block_a));
                }
            }
        }
        out
    }
}
