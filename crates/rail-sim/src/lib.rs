//! `rail-sim`: the simulation context and its step driver.
//!
//! # Cycle
//!
//! ```text
//! advance(delta_ms):
//!   ① Clock    : SimClock advances by delta_ms.
//!   ② Movement : MovementEngine steps every train in roster order
//!                (holds, detour phases, block rules, terminus dwell).
//!   ③ Alerts   : movement events become alert-feed entries.
//!   ④ Dispatch : the detector re-evaluates and replaces the
//!                recommendation.
//! ```
//!
//! Commands (hold, reroute, failures, policy, speed, re-plan, apply,
//! dismiss) run synchronously between cycles; see [`Command`] for the
//! scripted form.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rail_core::TrackId;
//! use rail_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new().standard_roster().build()?;
//! sim.inject_failure(TrackId::Up, 1);
//! sim.run_steps(50, 200, &mut NoopObserver);
//! println!("{}", sim.recommendation_text());
//! ```

pub mod alerts;
pub mod builder;
pub mod command;
pub mod error;
pub mod observer;
pub mod roster;
pub mod sim;
pub mod snapshot;


pub use alerts::{Alert, AlertLog, Severity};
pub use builder::SimBuilder;
pub use command::{Command, CommandOutcome};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use roster::standard_roster;
pub use sim::Sim;
pub use snapshot::{eta_secs, StepSummary, TrainSnapshot, TrainStatus};
