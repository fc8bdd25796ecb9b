//! The alert feed: a bounded, newest-first log of notable events.

use std::collections::VecDeque;
use std::fmt;

use rail_core::SimTime;

/// How urgent an alert is.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Something resolved (release, failures cleared, detour finished).
    Clear,
    Advisory,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Clear    => "clear",
            Severity::Advisory => "advisory",
            Severity::Warning  => "warning",
            Severity::Critical => "critical",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alert {
    pub at:       SimTime,
    pub severity: Severity,
    pub message:  String,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {:<8} {}", self.at, self.severity, self.message)
    }
}

/// Ring buffer of the most recent alerts.
///
/// Iteration is newest first.  Once `capacity` alerts are stored, pushing
/// drops the oldest.
#[derive(Clone, Debug)]
pub struct AlertLog {
    entries:  VecDeque<Alert>,
    capacity: usize,
    /// Alerts ever pushed, including dropped ones.
    total:    u64,
}

impl AlertLog {
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity, total: 0 }
    }

    pub fn push(&mut self, at: SimTime, severity: Severity, message: impl Into<String>) {
        self.entries.push_front(Alert { at, severity, message: message.into() });
        self.entries.truncate(self.capacity);
        self.total += 1;
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> + '_ {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Alert> {
        self.entries.front()
    }

    /// Alerts pushed since the counter read `since_total`, oldest first.
    ///
    /// Only alerts still in the buffer are returned.
    pub fn since(&self, since_total: u64) -> Vec<Alert> {
        let fresh = usize::try_from(self.total.saturating_sub(since_total)).unwrap_or(usize::MAX);
        self.entries.iter().take(fresh).rev().cloned().collect()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
