//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `LiftError` as one
//! variant where they need to surface id or config problems.

use thiserror::Error;

use crate::{CarId, FloorId, PassengerId};

/// The top-level error type for `lift-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum LiftError {
    #[error("passenger {0} not found")]
    PassengerNotFound(PassengerId),

    #[error("car {0} not found")]
    CarNotFound(CarId),

    #[error("floor {floor} is outside the building (floor count {floor_count})")]
    FloorOutOfRange { floor: FloorId, floor_count: u32 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `lift-*` crates.
pub type LiftResult<T> = Result<T, LiftError>;
