use lift_core::{CarId, FloorId, PassengerId};
use lift_passenger::PassengerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("passenger transition failed: {0}")]
    Passenger(#[from] PassengerError),

    #[error("car {car} has passenger {passenger} registered at floor {floor}, but the floor does not hold it")]
    PassengerMissing {
        car:       CarId,
        passenger: PassengerId,
        floor:     FloorId,
    },

    #[error("passenger {passenger} selected {selected:?}, not car {car}")]
    WrongCar {
        car:       CarId,
        passenger: PassengerId,
        selected:  Option<CarId>,
    },

    #[error("passenger {passenger} is already registered with car {car}")]
    AlreadyRegistered { car: CarId, passenger: PassengerId },
}

pub type DispatchResult<T> = Result<T, DispatchError>;
