//! Passenger lifecycle states.

use std::fmt;

/// Where a passenger is in its journey.
///
/// The states form a single chain; the only legal transition out of each
/// state is to its [`successor`][PassengerState::successor].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PassengerState {
    /// Spawned; wandering near the spawn point until a car is chosen.
    #[default]
    AwaitingSelection,
    /// A car was chosen; walking toward its door.
    WalkingToCar,
    /// Standing at the door, ready to board when the car stops here.
    WaitingAtCar,
    /// Inside the car.
    Boarded,
    /// Left the car at the target floor; walking to the drop-off point.
    Alighting,
    /// Terminal.
    Delivered,
}

impl PassengerState {
    /// The next state in the chain, `None` for `Delivered`.
    pub fn successor(self) -> Option<PassengerState> {
        use PassengerState::*;
        match self {
            AwaitingSelection => Some(WalkingToCar),
            WalkingToCar      => Some(WaitingAtCar),
            WaitingAtCar      => Some(Boarded),
            Boarded           => Some(Alighting),
            Alighting         => Some(Delivered),
            Delivered         => None,
        }
    }

    #[inline]
    pub fn can_transition_to(self, to: PassengerState) -> bool {
        self.successor() == Some(to)
    }

    /// `true` for the terminal `Delivered` state.
    #[inline]
    pub fn is_terminal(self) -> bool {
        self == PassengerState::Delivered
    }

    pub fn as_str(self) -> &'static str {
        use PassengerState::*;
        match self {
            AwaitingSelection => "awaiting_selection",
            WalkingToCar      => "walking_to_car",
            WaitingAtCar      => "waiting_at_car",
            Boarded           => "boarded",
            Alighting         => "alighting",
            Delivered         => "delivered",
        }
    }
}

impl fmt::Display for PassengerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
