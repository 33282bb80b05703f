//! Car events reported by [`CarDispatcher::update`][crate::CarDispatcher::update].

use lift_core::{Direction, FloorId, PassengerId};

/// Something a car did during one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarEvent {
    /// Doors closed (or the car was idle) and it set off toward `towards`.
    Departed {
        from:      FloorId,
        towards:   FloorId,
        direction: Direction,
    },
    /// Reached `floor`; doors are open.
    Arrived { floor: FloorId },
    /// A passenger got out at its target floor.
    Alighted { passenger: PassengerId, floor: FloorId },
    /// A waiting passenger got in.
    Boarded { passenger: PassengerId, floor: FloorId },
    /// Dwell elapsed with nobody still walking toward the doors.
    DoorsClosed { floor: FloorId },
    /// No pending stops; the car rests at `floor`.
    WentIdle { floor: FloorId },
}
