//! `rail-track`: static geometry of the corridor.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`block`]    | `Block`: one position range with an `intact` flag            |
//! | [`track`]    | `Track`: contiguous blocks, position → block index           |
//! | [`corridor`] | `Corridor`, `CorridorTable`, `Crossover`                     |
//! | [`layout`]   | `TrackLayout` (all tracks + corridors), `LayoutBuilder`      |
//! | [`error`]    | `TrackError`, `TrackResult<T>`                               |
//!
//! Geometry is one-dimensional: every track spans the same extent
//! `[x0, x1)` and is cut into blocks, the unit of mutual exclusion.  The
//! only mutable part of a layout is each block's `intact` flag, flipped by
//! failure injection.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod block;
pub mod corridor;
pub mod error;
pub mod layout;
pub mod track;


pub use block::Block;
pub use corridor::{Corridor, CorridorTable, Crossover};
pub use error::{TrackError, TrackResult};
pub use layout::{LayoutBuilder, TrackLayout};
pub use track::Track;
