use rail_core::{RailError, TrackId};
use rail_track::TrackError;
use rail_train::TrainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] RailError),

    #[error("layout error: {0}")]
    Layout(#[from] TrackError),

    #[error("roster error: {0}")]
    Roster(#[from] TrainError),

    #[error("trains {first:?} and {second:?} both start in block {block} of {track}")]
    InitialConflict {
        first:  String,
        second: String,
        track:  TrackId,
        block:  usize,
    },

    #[error("cannot parse command {0:?}")]
    BadCommand(String),
}

pub type SimResult<T> = Result<T, SimError>;
