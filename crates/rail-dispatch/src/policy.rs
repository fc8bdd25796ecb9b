//! The dispatch policy.

use std::fmt;
use std::str::FromStr;

use crate::DispatchError;

/// Process-wide setting that decides whether bypass corridors may be
/// proposed.  Read by the planner and the detector on every call.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Policy {
    /// Prefer corridor reroutes for the highest-priority train.
    #[default]
    Aggressive,
    /// Same planning as `Aggressive`; reported in the justification note.
    Conservative,
    /// Never propose wrong-line running; every plan degrades to holds.
    NoWrongLine,
}

impl Policy {
    pub const ALL: [Policy; 3] = [Policy::Aggressive, Policy::Conservative, Policy::NoWrongLine];

    #[inline]
    pub fn allows_wrong_line(self) -> bool {
        !matches!(self, Policy::NoWrongLine)
    }

    /// One-line explanation shown when the policy is selected.
    pub fn summary(self) -> &'static str {
        match self {
            Policy::Aggressive   => "prioritize highest priority using corridors",
            Policy::Conservative => "prefer holding near failures",
            Policy::NoWrongLine  => "keep normal lines, no corridor reroutes",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Aggressive   => f.write_str("Aggressive"),
            Policy::Conservative => f.write_str("Conservative"),
            Policy::NoWrongLine  => f.write_str("NoWrongLine"),
        }
    }
}

impl FromStr for Policy {
    type Err = DispatchError;

    /// Case-insensitive; `-` and `_` are ignored, so `no-wrong-line` parses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "aggressive"   => Ok(Policy::Aggressive),
            "conservative" => Ok(Policy::Conservative),
            "nowrongline"  => Ok(Policy::NoWrongLine),
            _              => Err(DispatchError::UnknownPolicy(s.to_owned())),
        }
    }
}
