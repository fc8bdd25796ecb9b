//! Track-geometry error type.

use thiserror::Error;

use rail_core::TrackId;

/// Errors produced by `rail-track`.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("layout has no blocks for track {0}")]
    MissingTrack(TrackId),

    #[error("track {0} defined twice")]
    DuplicateTrack(TrackId),

    #[error("track {track}: boundary {index} does not increase (gap or overlap)")]
    BadBoundary { track: TrackId, index: usize },

    #[error("track {0} does not span the layout extent")]
    ExtentMismatch(TrackId),

    #[error("corridor {0:?} defined twice")]
    DuplicateCorridor(String),

    #[error("corridor {0:?} lies outside the layout extent or is empty")]
    CorridorOutOfBounds(String),

    #[error("unknown corridor {0:?}")]
    UnknownCorridor(String),

    #[error("invalid crossover: {0}")]
    BadCrossover(String),

    #[error("block {index} out of range on track {track}")]
    BlockOutOfRange { track: TrackId, index: usize },
}

pub type TrackResult<T> = Result<T, TrackError>;
