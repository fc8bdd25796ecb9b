use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("train number {0:?} is already in the roster")]
    DuplicateNumber(String),

    #[error("train {number:?} at {position} is outside the corridor [{x0}, {x1}]")]
    OffLayout {
        number:   String,
        position: f64,
        x0:       f64,
        x1:       f64,
    },

    #[error("train {number:?} has non-positive speed {speed_kmh} km/h")]
    BadSpeed { number: String, speed_kmh: f64 },
}

pub type TrainResult<T> = Result<T, TrainError>;
