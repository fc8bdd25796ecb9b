//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `RailError` where they
//! parse or validate core values.

use thiserror::Error;

/// The top-level error type for `rail-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum RailError {
    #[error("unknown track {0:?}")]
    UnknownTrack(String),

    #[error("unknown direction {0:?}")]
    UnknownDirection(String),

    #[error("unknown priority {0:?}")]
    UnknownPriority(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `rail-*` crates.
pub type RailResult<T> = Result<T, RailError>;
