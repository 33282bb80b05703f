//! `SelectionPolicy` — who picks a car for a waiting passenger.
//!
//! In the interactive game a player clicks a car for each passenger; the
//! headless simulator asks a policy instead.  [`ManualSelection`] leaves the
//! choice to whoever calls [`Sim::select_car`][crate::Sim::select_car].

use lift_core::CarId;
use lift_dispatch::CarDispatcher;
use lift_passenger::Passenger;

/// Chooses a car for a passenger that is awaiting selection.
///
/// Called once per tick for every such passenger, in floor then spawn order.
/// Returning `None` leaves the passenger waiting until the next tick.
pub trait SelectionPolicy {
    fn choose(&mut self, passenger: &Passenger, cars: &[CarDispatcher]) -> Option<CarId>;
}

/// Never selects; an external caller drives selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualSelection;

impl SelectionPolicy for ManualSelection {
    fn choose(&mut self, _passenger: &Passenger, _cars: &[CarDispatcher]) -> Option<CarId> {
        None
    }
}

/// Sends everyone to the same car.
#[derive(Debug, Clone, Copy)]
pub struct FixedCar(pub CarId);

impl SelectionPolicy for FixedCar {
    fn choose(&mut self, _passenger: &Passenger, cars: &[CarDispatcher]) -> Option<CarId> {
        cars.iter().any(|c| c.id() == self.0).then_some(self.0)
    }
}

/// Picks the car with the fewest boarded plus registered passengers; ties go
/// to the lowest car id.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeastLoaded;

impl SelectionPolicy for LeastLoaded {
    fn choose(&mut self, _passenger: &Passenger, cars: &[CarDispatcher]) -> Option<CarId> {
        cars.iter().min_by_key(|c| (c.load(), c.id())).map(CarDispatcher::id)
    }
}

impl<P: SelectionPolicy + ?Sized> SelectionPolicy for Box<P> {
    fn choose(&mut self, passenger: &Passenger, cars: &[CarDispatcher]) -> Option<CarId> {
        (**self).choose(passenger, cars)
    }
}
