//! Bypass corridors, the block → corridor lookup, and the platform crossover.

use rail_core::{Direction, TrackId};

// ── Corridor ──────────────────────────────────────────────────────────────────

/// A named wrong-line bypass region `[x0, x1)` between the two main lines.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Corridor {
    pub name: String,
    pub x0:   f64,
    pub x1:   f64,
}

impl Corridor {
    pub fn new(name: impl Into<String>, x0: f64, x1: f64) -> Self {
        Self { name: name.into(), x0, x1 }
    }

    /// Where a train running in `dir` switches onto the via track.
    #[inline]
    pub fn entry(&self, dir: Direction) -> f64 {
        match dir {
            Direction::Up   => self.x0,
            Direction::Down => self.x1,
        }
    }

    /// Where a train running in `dir` returns to its home track.
    #[inline]
    pub fn exit(&self, dir: Direction) -> f64 {
        match dir {
            Direction::Up   => self.x1,
            Direction::Down => self.x0,
        }
    }

    /// Closed-range containment used for corridor occupancy: a train sitting
    /// exactly on either end counts as inside.
    #[inline]
    pub fn covers(&self, x: f64) -> bool {
        x >= self.x0.min(self.x1) && x <= self.x0.max(self.x1)
    }
}

// ── CorridorTable ─────────────────────────────────────────────────────────────

/// Static lookup from a failed block index to candidate corridor names,
/// ordered by preference.
///
/// Indices without an explicit entry use the fallback list.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorridorTable {
    by_block: Vec<Vec<String>>,
    fallback: Vec<String>,
}

impl CorridorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidates for `block_index`, growing the table as needed.
    pub fn set(&mut self, block_index: usize, names: &[&str]) {
        if self.by_block.len() <= block_index {
            self.by_block.resize(block_index + 1, Vec::new());
        }
        self.by_block[block_index] = names.iter().map(|s| (*s).to_owned()).collect();
    }

    pub fn set_fallback(&mut self, names: &[&str]) {
        self.fallback = names.iter().map(|s| (*s).to_owned()).collect();
    }

    /// Candidate corridor names for a failure in `block_index`.
    pub fn candidates(&self, block_index: usize) -> &[String] {
        match self.by_block.get(block_index) {
            Some(names) if !names.is_empty() => names,
            _ => &self.fallback,
        }
    }

    /// Every name referenced by the table, for validation.
    pub(crate) fn all_names(&self) -> impl Iterator<Item = &String> + '_ {
        self.by_block.iter().flatten().chain(self.fallback.iter())
    }
}

// ── Crossover ─────────────────────────────────────────────────────────────────

/// The shared crossover between two adjacent platform loops.  Two trains,
/// one on each track, both inside `[x0, x1)` are a conflict.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crossover {
    pub first:  TrackId,
    pub second: TrackId,
    pub x0:     f64,
    pub x1:     f64,
}

impl Crossover {
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.x0 && x < self.x1
    }
}
