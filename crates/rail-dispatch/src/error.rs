use rail_core::TrackId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown dispatch policy {0:?}")]
    UnknownPolicy(String),
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Why the corridor planner did not install a route.
///
/// These are expected outcomes, not faults: the caller reports them as a
/// notice and carries on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlanRefusal {
    #[error("train {0:?} is not in the roster")]
    UnknownTrain(String),

    #[error("train {0:?} is already on a detour")]
    AlreadyOnDetour(String),

    #[error("no failed block ahead")]
    NoFailureAhead,

    #[error("{0} has no opposite running line")]
    NoOppositeTrack(TrackId),

    #[error("no safe corridor available now")]
    NoSafeCorridor,

    #[error("current policy forbids wrong-line running")]
    PolicyForbids,
}
