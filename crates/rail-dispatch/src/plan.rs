//! Dispatcher plans.

use std::fmt;

use rail_core::{TrackId, TrainId};

/// Why a hold plan was proposed.  Also decides the hold duration when the
/// plan is applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HoldReason {
    /// Two trains inside the platform crossover.
    Crossover,
    /// Trains approaching failed block `block` of `track`.
    BeforeFailure { track: TrackId, block: usize },
}

impl fmt::Display for HoldReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoldReason::Crossover => f.write_str("at mid crossover"),
            HoldReason::BeforeFailure { track, block } => {
                write!(f, "before {} Blk{}", track.as_str().to_ascii_uppercase(), block + 1)
            }
        }
    }
}

/// One action of a recommendation.
///
/// Both the text composer and the applier match on this exhaustively.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Plan {
    /// Hold every listed train in place.
    Hold {
        trains: Vec<TrainId>,
        reason: HoldReason,
    },

    /// Send `lead` through `corridor` on the `via` track and hold `holds`.
    Reroute {
        lead:     TrainId,
        via:      TrackId,
        corridor: String,
        holds:    Vec<TrainId>,
    },
}

impl Plan {
    #[inline]
    pub fn is_reroute(&self) -> bool {
        matches!(self, Plan::Reroute { .. })
    }
}
