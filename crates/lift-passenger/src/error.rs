use lift_core::{FloorId, PassengerId};
use thiserror::Error;

use crate::PassengerState;

#[derive(Debug, Error)]
pub enum PassengerError {
    #[error("passenger {id} cannot go from {from} to {to}")]
    InvalidTransition {
        id:   PassengerId,
        from: PassengerState,
        to:   PassengerState,
    },

    #[error("passenger {id} targets floor {target} but was asked to alight at {floor}")]
    WrongFloor {
        id:     PassengerId,
        target: FloorId,
        floor:  FloorId,
    },

    #[error("passenger {id} spawns on floor {floor} and cannot target the same floor")]
    SameFloor { id: PassengerId, floor: FloorId },
}

pub type PassengerResult<T> = Result<T, PassengerError>;
