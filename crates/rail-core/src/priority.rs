//! Train priority classes.

use std::fmt;
use std::str::FromStr;

use crate::RailError;

/// Dispatch priority.  Variants are declared lowest first so the derived
/// `Ord` gives `Low < Medium < High`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Numeric rank (`Low = 1` .. `High = 3`).
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low    => 1,
            Priority::Medium => 2,
            Priority::High   => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low    => f.write_str("Low"),
            Priority::Medium => f.write_str("Medium"),
            Priority::High   => f.write_str("High"),
        }
    }
}

impl FromStr for Priority {
    type Err = RailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low"    => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high"   => Ok(Priority::High),
            _        => Err(RailError::UnknownPriority(s.to_owned())),
        }
    }
}
