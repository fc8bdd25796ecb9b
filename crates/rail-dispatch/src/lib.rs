//! `rail-dispatch`: deciding what the dispatcher should do about conflicts.
//!
//! # Crate layout
//!
//! | Module             | Contents                                                   |
//! |--------------------|------------------------------------------------------------|
//! | [`policy`]         | `Policy` (`Aggressive`, `Conservative`, `NoWrongLine`)     |
//! | [`context`]        | `DispatchContext<'a>`: read-only view used for planning    |
//! | [`planner`]        | Corridor planner: failure scan, corridor choice, routing   |
//! | [`plan`]           | `Plan` (`Hold` / `Reroute`), `HoldReason`                  |
//! | [`recommendation`] | `Recommendation` and its justification text                |
//! | [`detector`]       | Conflict detector: crossover check, failure planning       |
//! | [`apply`]          | Executing a recommendation, `DispatchAction`               |
//! | [`error`]          | `DispatchError`, `PlanRefusal`                             |
//!
//! # Design notes
//!
//! Dispatch runs in two phases, like the movement step it follows:
//!
//! 1. **Evaluate** (read-only): [`detector::evaluate`] inspects a
//!    `DispatchContext` and returns a `Recommendation` made of `Plan`s.
//!    Nothing is mutated, so a recommendation can be shown and dismissed
//!    freely.
//!
//! 2. **Apply** (sequential): [`apply::apply`] matches every plan and
//!    mutates the `TrainStore`: holds get a deadline, reroutes get a `Pre`
//!    phase `Route`.

pub mod apply;
pub mod context;
pub mod detector;
pub mod error;
pub mod plan;
pub mod planner;
pub mod policy;
pub mod recommendation;

#[cfg(test)]
mod tests;

pub use apply::{apply, DispatchAction};
pub use context::DispatchContext;
pub use detector::evaluate;
pub use error::{DispatchError, DispatchResult, PlanRefusal};
pub use plan::{HoldReason, Plan};
pub use planner::{install_route, nearest_failure_ahead, plan_corridor, select_corridor, CorridorChoice};
pub use policy::Policy;
pub use recommendation::{Recommendation, ALL_CLEAR};
