//! The `FloorRegistry` port.

use lift_core::{FloorId, PassengerId};
use lift_passenger::Passenger;

/// What a car needs from the floors it serves.
///
/// The building owns every passenger that is not inside a car.  A car looks
/// waiting passengers up by id (to read their state), removes them when they
/// board and hands them back when they alight.  Each transfer is a single
/// call, so a passenger is never owned by both sides or by neither.
pub trait FloorRegistry {
    /// Default drop-off x position on `floor`; `None` lets the car use its
    /// own door position.
    fn spawn_point_x(&self, floor: FloorId) -> Option<f32>;

    /// A passenger standing on `floor` (not yet boarded), if present.
    fn passenger(&self, floor: FloorId, id: PassengerId) -> Option<&Passenger>;

    /// Take ownership of a boarding passenger.
    fn remove_passenger(&mut self, floor: FloorId, id: PassengerId) -> Option<Passenger>;

    /// Return ownership of a passenger who just alighted at `floor`.
    fn add_arrived_passenger(&mut self, floor: FloorId, passenger: Passenger);

    /// Put back a passenger taken with `remove_passenger` whose boarding
    /// failed.  It stands on `floor` again, unchanged.
    fn return_passenger(&mut self, floor: FloorId, passenger: Passenger);
}
