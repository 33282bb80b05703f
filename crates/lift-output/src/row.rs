//! Plain data row types written by output backends.

use lift_core::Direction;
use lift_dispatch::MotionState;
use lift_passenger::Priority;

/// One car's state at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarSnapshotRow {
    pub car_id:    u16,
    pub tick:      u64,
    /// Continuous shaft position in floors.
    pub position:  f64,
    pub floor:     u32,
    pub direction: Direction,
    pub motion:    MotionState,
    pub boarded:   u32,
    /// Passengers registered with the car and not yet aboard.
    pub waiting:   u32,
    /// Head of the target sequence; `u32::MAX` when the car has none.
    pub next_stop: u32,
}

/// Counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub time_secs:      f64,
    pub spawned:        u32,
    pub delivered:      u32,
    pub waiting:        u32,
    pub riding:         u32,
    pub pending_spawns: u32,
    pub total_penalty:  f64,
}

/// One scored delivery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryRow {
    pub tick:            u64,
    pub passenger_id:    u32,
    pub priority:        Priority,
    pub spawn_floor:     u32,
    pub target_floor:    u32,
    pub request_secs:    f64,
    pub assignment_secs: f64,
    pub delivery_secs:   f64,
    pub penalty:         f64,
}
