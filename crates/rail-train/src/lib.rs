//! `rail-train`: trains, block occupancy, and movement.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`train`]     | `Train`, `TrainState`, `Route`, `RoutePhase`                   |
//! | [`store`]     | `TrainStore`: the roster, indexed by `TrainId`                 |
//! | [`occupancy`] | `Occupancy`: "is block B on track T free for train X"          |
//! | [`engine`]    | `MovementEngine`: the per-step state machine                   |
//! | [`event`]     | `MovementEvent`: state transitions reported by a step          |
//! | [`error`]     | `TrainError`, `TrainResult<T>`                                 |
//!
//! # Movement model
//!
//! Every step, trains are visited in roster order.  A train either advances
//! by `speed × dt` or is refused and accrues delay instead.  Refusal never
//! moves anyone else: a mover is blocked, not the occupant evicted.  Hold
//! and dwell timers are absolute `SimTime` deadlines compared against the
//! simulated clock, so nothing ever waits on real time.

pub mod engine;
pub mod error;
pub mod event;
pub mod occupancy;
pub mod store;
pub mod train;


pub use engine::MovementEngine;
pub use error::{TrainError, TrainResult};
pub use event::MovementEvent;
pub use occupancy::Occupancy;
pub use store::TrainStore;
pub use train::{Route, RoutePhase, Train, TrainState};
