use lift_core::LiftError;
use lift_dispatch::DispatchError;
use lift_passenger::PassengerError;
use lift_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] LiftError),

    #[error("passenger error: {0}")]
    Passenger(#[from] PassengerError),

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("schedule error: {0}")]
    Schedule(#[from] ScheduleError),
}

pub type SimResult<T> = Result<T, SimError>;
