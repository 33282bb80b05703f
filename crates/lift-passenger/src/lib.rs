//! `lift-passenger` — the per-passenger lifecycle and its penalty model.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`penalty`]   | `Priority`, `PenaltyCoefficients`, `ServiceTimes`, `penalty` |
//! | [`state`]     | `PassengerState` and its transition table                  |
//! | [`passenger`] | `Passenger`, `PassengerSpec`, `Appearance`, `WalkParams`   |
//! | [`error`]     | `PassengerError`, `PassengerResult<T>`                     |
//!
//! # Lifecycle
//!
//! ```text
//! AwaitingSelection ─select_car─▶ WalkingToCar ─(reaches door)─▶ WaitingAtCar
//!     ─board─▶ Boarded ─alight─▶ Alighting ─(reaches drop-off)─▶ Delivered
//! ```
//!
//! Every transition goes through one guarded setter; skipping or reversing a
//! step yields [`PassengerError::InvalidTransition`].

pub mod error;
pub mod passenger;
pub mod penalty;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{PassengerError, PassengerResult};
pub use passenger::{Appearance, Passenger, PassengerSpec, WalkParams};
pub use penalty::{PenaltyCoefficients, Priority, ServiceTimes, penalty};
pub use state::PassengerState;
