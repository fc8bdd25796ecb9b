//! `rail-core`: foundational types for the corridor dispatch simulator.
//!
//! This crate is a dependency of every other `rail-*` crate.  It has no
//! `rail-*` dependencies and only `thiserror` (plus optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`ids`]        | `TrainId`                                              |
//! | [`line`]       | `TrackId`, `Direction`                                 |
//! | [`priority`]   | `Priority` (`Low < Medium < High`)                     |
//! | [`time`]       | `SimTime`, `SimClock`                                  |
//! | [`config`]     | `SimConfig`                                            |
//! | [`error`]      | `RailError`, `RailResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod line;
pub mod priority;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{RailError, RailResult};
pub use ids::TrainId;
pub use line::{Direction, TrackId};
pub use priority::Priority;
pub use time::{SimClock, SimTime};
