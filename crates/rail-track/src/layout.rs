//! The full corridor layout and its builder.

use rail_core::TrackId;

use crate::{Block, Corridor, CorridorTable, Crossover, Track, TrackError, TrackResult};

// ── TrackLayout ───────────────────────────────────────────────────────────────

/// All five tracks, the bypass corridors, and the crossover.
///
/// Tracks are stored in `TrackId` declaration order so lookup is a direct
/// index.  Build with [`LayoutBuilder`] or take [`TrackLayout::standard`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackLayout {
    /// Lower end of every track.
    pub x0: f64,
    /// Upper end of every track.
    pub x1: f64,

    tracks: Vec<Track>,

    pub corridors: Vec<Corridor>,
    pub corridor_table: CorridorTable,
    pub crossover: Option<Crossover>,
}

impl TrackLayout {
    /// The reference corridor, see [`LayoutBuilder::standard`].
    pub fn standard() -> TrackResult<Self> {
        LayoutBuilder::standard().build()
    }

    #[inline]
    pub fn track(&self, id: TrackId) -> &Track {
        &self.tracks[id as usize]
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index of the block on `track` containing `x`.
    #[inline]
    pub fn block_index(&self, track: TrackId, x: f64) -> usize {
        self.track(track).block_index(x)
    }

    #[inline]
    pub fn is_intact(&self, track: TrackId, index: usize) -> bool {
        self.track(track).is_intact(index)
    }

    pub fn block(&self, track: TrackId, index: usize) -> Option<&Block> {
        self.track(track).block(index)
    }

    /// Flip the `intact` flag of one block.
    pub fn set_intact(&mut self, track: TrackId, index: usize, intact: bool) -> TrackResult<()> {
        let block = self.tracks[track as usize]
            .blocks
            .get_mut(index)
            .ok_or(TrackError::BlockOutOfRange { track, index })?;
        block.intact = intact;
        Ok(())
    }

    pub fn fail_block(&mut self, track: TrackId, index: usize) -> TrackResult<()> {
        self.set_intact(track, index, false)
    }

    /// Mark every block on every track intact.
    pub fn clear_failures(&mut self) {
        for track in &mut self.tracks {
            for block in &mut track.blocks {
                block.intact = true;
            }
        }
    }

    /// `(track, index)` of every failed block on the given tracks.
    pub fn failed_blocks(&self, tracks: &[TrackId]) -> Vec<(TrackId, usize)> {
        tracks
            .iter()
            .flat_map(|&t| self.track(t).failed_blocks().map(move |(i, _)| (t, i)))
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        self.tracks.iter().any(|t| t.failed_blocks().next().is_some())
    }

    pub fn corridor(&self, name: &str) -> Option<&Corridor> {
        self.corridors.iter().find(|c| c.name == name)
    }

    /// Candidate corridors for a failure in `block_index`, in preference
    /// order.  Names missing from the layout are skipped.
    pub fn corridor_candidates(&self, block_index: usize) -> impl Iterator<Item = &Corridor> + '_ {
        self.corridor_table
            .candidates(block_index)
            .iter()
            .filter_map(|name| self.corridor(name))
    }

    /// `true` if both ends of `corridor` sit on intact blocks of `via`.
    pub fn corridor_blocks_intact(&self, corridor: &Corridor, via: TrackId) -> bool {
        let track = self.track(via);
        let enter = track.block_index(corridor.x0 + 1.0);
        let exit  = track.block_index(corridor.x1 - 1.0);
        track.is_intact(enter) && track.is_intact(exit)
    }
}

// ── LayoutBuilder ─────────────────────────────────────────────────────────────

/// Fluent builder for [`TrackLayout`].
///
/// Each track is given as a list of block boundaries, e.g.
/// `[160, 400, 560]` produces blocks `[160, 400)` and `[400, 560)`.
/// [`build`][Self::build] validates that:
///
/// - all five tracks are present, each exactly once;
/// - boundaries strictly increase (no gaps, overlaps, or empty blocks);
/// - every track spans the same extent;
/// - corridor names are unique and corridors lie within the extent;
/// - the candidate table only names defined corridors;
/// - the crossover joins two distinct tracks inside the extent.
#[derive(Default)]
pub struct LayoutBuilder {
    tracks:    Vec<(TrackId, Vec<f64>)>,
    corridors: Vec<Corridor>,
    table:     CorridorTable,
    crossover: Option<Crossover>,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference corridor: extent `[160, 1040)`, four blocks on each main
    /// line, single-block platform loops, three bypass corridors, and a
    /// crossover between `Mid1` and `Mid2` over `[520, 640)`.
    pub fn standard() -> Self {
        let main = [160.0, 400.0, 560.0, 800.0, 1040.0];
        let whole = [160.0, 1040.0];
        Self::new()
            .track(TrackId::Up, &main)
            .track(TrackId::Mid1, &whole)
            .track(TrackId::Mid2, &whole)
            .track(TrackId::Mid3, &whole)
            .track(TrackId::Down, &main)
            .corridor("left", 360.0, 440.0)
            .corridor("mid", 520.0, 640.0)
            .corridor("right", 760.0, 840.0)
            .candidates(0, &["left", "mid"])
            .candidates(1, &["left", "mid"])
            .candidates(2, &["mid", "right"])
            .candidates(3, &["right", "mid"])
            .fallback_candidates(&["mid"])
            .crossover(TrackId::Mid1, TrackId::Mid2, 520.0, 640.0)
    }

    pub fn track(mut self, id: TrackId, boundaries: &[f64]) -> Self {
        self.tracks.push((id, boundaries.to_vec()));
        self
    }

    pub fn corridor(mut self, name: &str, x0: f64, x1: f64) -> Self {
        self.corridors.push(Corridor::new(name, x0, x1));
        self
    }

    pub fn candidates(mut self, block_index: usize, names: &[&str]) -> Self {
        self.table.set(block_index, names);
        self
    }

    pub fn fallback_candidates(mut self, names: &[&str]) -> Self {
        self.table.set_fallback(names);
        self
    }

    pub fn crossover(mut self, first: TrackId, second: TrackId, x0: f64, x1: f64) -> Self {
        self.crossover = Some(Crossover { first, second, x0, x1 });
        self
    }

    pub fn build(self) -> TrackResult<TrackLayout> {
        // ── Tracks ────────────────────────────────────────────────────────
        let mut slots: Vec<Option<Track>> = vec![None; TrackId::ALL.len()];
        for (id, bounds) in self.tracks {
            if slots[id as usize].is_some() {
                return Err(TrackError::DuplicateTrack(id));
            }
            if bounds.len() < 2 {
                return Err(TrackError::MissingTrack(id));
            }
            if let Some(i) = bounds.windows(2).position(|w| !(w[1] > w[0])) {
                return Err(TrackError::BadBoundary { track: id, index: i + 1 });
            }
            let blocks = bounds.windows(2).map(|w| Block::new(w[0], w[1])).collect();
            slots[id as usize] = Some(Track { id, blocks });
        }

        let mut tracks = Vec::with_capacity(slots.len());
        for (slot, id) in slots.into_iter().zip(TrackId::ALL) {
            tracks.push(slot.ok_or(TrackError::MissingTrack(id))?);
        }

        let x0 = tracks[0].blocks[0].x0;
        let x1 = tracks[0].blocks[tracks[0].blocks.len() - 1].x1;
        for track in &tracks {
            let first = track.blocks[0].x0;
            let last  = track.blocks[track.blocks.len() - 1].x1;
            if first != x0 || last != x1 {
                return Err(TrackError::ExtentMismatch(track.id));
            }
        }

        // ── Corridors ─────────────────────────────────────────────────────
        for (i, c) in self.corridors.iter().enumerate() {
            if self.corridors[..i].iter().any(|o| o.name == c.name) {
                return Err(TrackError::DuplicateCorridor(c.name.clone()));
            }
            if !(c.x0 < c.x1) || c.x0 < x0 || c.x1 > x1 {
                return Err(TrackError::CorridorOutOfBounds(c.name.clone()));
            }
        }
        if let Some(name) = self
            .table
            .all_names()
            .find(|n| !self.corridors.iter().any(|c| &c.name == *n))
        {
            return Err(TrackError::UnknownCorridor(name.clone()));
        }

        // ── Crossover ─────────────────────────────────────────────────────
        if let Some(x) = &self.crossover {
            if x.first == x.second {
                return Err(TrackError::BadCrossover(format!(
                    "both sides are track {}",
                    x.first
                )));
            }
            if !(x.x0 < x.x1) || x.x0 < x0 || x.x1 > x1 {
                return Err(TrackError::BadCrossover(format!(
                    "range [{}, {}) outside [{x0}, {x1})",
                    x.x0, x.x1
                )));
            }
        }

        Ok(TrackLayout {
            x0,
            x1,
            tracks,
            corridors:      self.corridors,
            corridor_table: self.table,
            crossover:      self.crossover,
        })
    }
}
