//! Track identifiers and running directions.

use std::fmt;
use std::str::FromStr;

use crate::RailError;

/// One of the five parallel tracks of the corridor.
///
/// `Up` and `Down` are the main running lines; each direction of travel has
/// one of them as its home track.  `Mid1..Mid3` are platform loops with a
/// single block each.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TrackId {
    Up,
    Mid1,
    Mid2,
    Mid3,
    Down,
}

impl TrackId {
    /// Every track, in the order they are drawn top to bottom.
    pub const ALL: [TrackId; 5] = [
        TrackId::Up,
        TrackId::Mid1,
        TrackId::Mid2,
        TrackId::Mid3,
        TrackId::Down,
    ];

    /// The two main running lines, scanned for failures by the dispatcher.
    pub const MAIN_LINES: [TrackId; 2] = [TrackId::Up, TrackId::Down];

    /// The opposite-direction main line, used as the via track of a detour.
    ///
    /// Platform loops have no opposite line.
    pub fn opposite(self) -> Option<TrackId> {
        match self {
            TrackId::Up   => Some(TrackId::Down),
            TrackId::Down => Some(TrackId::Up),
            TrackId::Mid1 | TrackId::Mid2 | TrackId::Mid3 => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrackId::Up   => "up",
            TrackId::Mid1 => "mid1",
            TrackId::Mid2 => "mid2",
            TrackId::Mid3 => "mid3",
            TrackId::Down => "down",
        }
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackId {
    type Err = RailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up"   => Ok(TrackId::Up),
            "mid1" => Ok(TrackId::Mid1),
            "mid2" => Ok(TrackId::Mid2),
            "mid3" => Ok(TrackId::Mid3),
            "down" => Ok(TrackId::Down),
            _      => Err(RailError::UnknownTrack(s.to_owned())),
        }
    }
}

/// Direction of travel along the corridor.
///
/// `Up` trains move towards increasing positions, `Down` trains towards
/// decreasing positions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// `+1.0` for `Up`, `-1.0` for `Down`.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Up   => 1.0,
            Direction::Down => -1.0,
        }
    }

    #[inline]
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Up   => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// The main line a train running in this direction normally uses.
    #[inline]
    pub fn home_track(self) -> TrackId {
        match self {
            Direction::Up   => TrackId::Up,
            Direction::Down => TrackId::Down,
        }
    }

    /// `true` if a train running this way that has moved to `to` has
    /// reached or passed `target`.
    #[inline]
    pub fn reaches(self, to: f64, target: f64) -> bool {
        match self {
            Direction::Up   => to >= target,
            Direction::Down => to <= target,
        }
    }

    /// `true` if `a` lies strictly ahead of `b` in this direction.
    #[inline]
    pub fn is_ahead(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Up   => a > b,
            Direction::Down => a < b,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up   => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

impl FromStr for Direction {
    type Err = RailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up"   => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _      => Err(RailError::UnknownDirection(s.to_owned())),
        }
    }
}
