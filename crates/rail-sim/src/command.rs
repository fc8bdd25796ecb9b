//! Caller commands and their outcomes.

use std::str::FromStr;

use rail_core::TrackId;
use rail_dispatch::{CorridorChoice, PlanRefusal, Policy, Recommendation};
use rail_train::TrainState;

use crate::SimError;

/// One request from a UI or script, see [`Sim::execute`][crate::Sim::execute].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Run one step of `delta_ms` simulated milliseconds.
    Advance(u64),
    HoldToggle(String),
    ManualReroute(String),
    InjectFailure { track: TrackId, block: usize },
    ClearFailures,
    SetPolicy(Policy),
    SetSpeed(f64),
    ReplanAll,
    Recompute,
    ApplyRecommendation,
    DismissRecommendation,
}

/// Result of [`Sim::execute`][crate::Sim::execute].
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutcome {
    /// The command has nothing to report.
    Done,
    /// Whether the command changed anything.
    Changed(bool),
    /// New state after a hold toggle; `None` for an unknown train.
    Toggled(Option<TrainState>),
    Rerouted(Result<CorridorChoice, PlanRefusal>),
    /// Trains that received a route.
    Replanned(usize),
    Recommendation(Option<Recommendation>),
}

impl FromStr for Command {
    type Err = SimError;

    /// Parse one script line:
    ///
    /// ```text
    /// advance 200      hold 12001       reroute 12001
    /// fail up 1        clear            policy no-wrong-line
    /// speed 2.5        replan           recompute
    /// apply            dismiss
    /// ```
    ///
    /// Block indices are zero-based.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || SimError::BadCommand(s.to_owned());
        let words: Vec<&str> = s.split_whitespace().collect();
        let cmd = match words.as_slice() {
            ["advance", ms]       => Command::Advance(ms.parse().map_err(|_| bad())?),
            ["hold", number]      => Command::HoldToggle((*number).to_owned()),
            ["reroute", number]   => Command::ManualReroute((*number).to_owned()),
            ["fail", track, block] => Command::InjectFailure {
                track: track.parse().map_err(|_| bad())?,
                block: block.parse().map_err(|_| bad())?,
            },
            ["clear"]             => Command::ClearFailures,
            ["policy", policy]    => Command::SetPolicy(policy.parse().map_err(|_| bad())?),
            ["speed", mult]       => Command::SetSpeed(mult.parse().map_err(|_| bad())?),
            ["replan"]            => Command::ReplanAll,
            ["recompute"]         => Command::Recompute,
            ["apply"]             => Command::ApplyRecommendation,
            ["dismiss"]           => Command::DismissRecommendation,
            _                     => return Err(bad()),
        };
        Ok(cmd)
    }
}
