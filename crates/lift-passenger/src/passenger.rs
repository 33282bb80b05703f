//! The `Passenger` — one customer's journey from spawn to delivery.

use lift_core::{CarId, FloorId, PassengerId};
use tracing::trace;

use crate::penalty::{self, PenaltyCoefficients, Priority, ServiceTimes};
use crate::{PassengerError, PassengerResult, PassengerState};

// ── Parameters ────────────────────────────────────────────────────────────────

/// Lateral movement constants, in floor-layout units (pixels in the original
/// 800-unit-wide layout) and seconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WalkParams {
    /// Speed when walking to a car door or to the drop-off point.
    pub walk_speed: f32,
    /// Speed when idly wandering before a car is chosen.
    pub wander_speed: f32,
    /// Wandering never comes closer than this to either floor edge.
    pub wander_margin: f32,
    /// A walker within this distance of its goal snaps onto it.
    pub snap_distance: f32,
    /// Passenger body width, subtracted at the right-hand edge.
    pub body_width: f32,
    /// Width of every floor.
    pub floor_width: f32,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            walk_speed:    120.0,
            wander_speed:  30.0,
            wander_margin: 100.0,
            snap_distance: 2.0,
            body_width:    20.0,
            floor_width:   800.0,
        }
    }
}

/// Purely cosmetic attributes, drawn by the spawn factory.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Appearance {
    pub color:          [u8; 3],
    pub popup_offset_y: i32,
}

/// Everything needed to create a passenger.
#[derive(Clone, Debug)]
pub struct PassengerSpec {
    pub id:           PassengerId,
    pub spawn_floor:  FloorId,
    pub spawn_x:      f32,
    pub target_floor: FloorId,
    pub priority:     Priority,
    pub request_time: f64,
    pub appearance:   Appearance,
    /// Initial wander heading: `true` for rightward.
    pub wander_right: bool,
}

// ── Passenger ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Passenger {
    id:            PassengerId,
    spawn_floor:   FloorId,
    current_floor: FloorId,
    target_floor:  FloorId,
    priority:      Priority,
    coefficients:  PenaltyCoefficients,
    times:         ServiceTimes,
    state:         PassengerState,
    selected_car:  Option<CarId>,
    spawn_x:       f32,
    x:             f32,
    drop_x:        Option<f32>,
    wander_sign:   f32,
    focused:       bool,
    appearance:    Appearance,
}

impl Passenger {
    /// Create a passenger in `AwaitingSelection`.
    ///
    /// # Errors
    ///
    /// [`PassengerError::SameFloor`] if the target is the spawn floor.
    pub fn new(spec: PassengerSpec) -> PassengerResult<Self> {
        if spec.target_floor == spec.spawn_floor {
            return Err(PassengerError::SameFloor { id: spec.id, floor: spec.spawn_floor });
        }
        Ok(Self {
            id:            spec.id,
            spawn_floor:   spec.spawn_floor,
            current_floor: spec.spawn_floor,
            target_floor:  spec.target_floor,
            priority:      spec.priority,
            coefficients:  spec.priority.coefficients(),
            times:         ServiceTimes::requested_at(spec.request_time),
            state:         PassengerState::AwaitingSelection,
            selected_car:  None,
            spawn_x:       spec.spawn_x,
            x:             spec.spawn_x,
            drop_x:        None,
            wander_sign:   if spec.wander_right { 1.0 } else { -1.0 },
            focused:       false,
            appearance:    spec.appearance,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline] pub fn id(&self) -> PassengerId { self.id }
    #[inline] pub fn spawn_floor(&self) -> FloorId { self.spawn_floor }
    #[inline] pub fn current_floor(&self) -> FloorId { self.current_floor }
    #[inline] pub fn target_floor(&self) -> FloorId { self.target_floor }
    #[inline] pub fn priority(&self) -> Priority { self.priority }
    #[inline] pub fn coefficients(&self) -> PenaltyCoefficients { self.coefficients }
    #[inline] pub fn times(&self) -> &ServiceTimes { &self.times }
    #[inline] pub fn state(&self) -> PassengerState { self.state }
    #[inline] pub fn selected_car(&self) -> Option<CarId> { self.selected_car }
    #[inline] pub fn x(&self) -> f32 { self.x }
    #[inline] pub fn appearance(&self) -> Appearance { self.appearance }

    /// `true` while the passenger is walking toward `car`'s door.
    #[inline]
    pub fn is_walking_to(&self, car: CarId) -> bool {
        self.state == PassengerState::WalkingToCar && self.selected_car == Some(car)
    }

    /// UI hover: a focused passenger stops wandering.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Assign this passenger to `car` at time `now`.
    ///
    /// Returns `false` (and changes nothing) unless the passenger is still
    /// awaiting selection, so a second click never re-stamps the assignment.
    pub fn select_car(&mut self, car: CarId, now: f64) -> bool {
        if self.state != PassengerState::AwaitingSelection {
            return false;
        }
        self.state = PassengerState::WalkingToCar;
        self.selected_car = Some(car);
        self.focused = false;
        self.times.assignment = Some(now.max(self.times.request));
        trace!(passenger = %self.id, %car, now, "car selected");
        true
    }

    /// Enter the car.  Only legal from `WaitingAtCar`.
    pub fn board(&mut self) -> PassengerResult<()> {
        self.transition(PassengerState::Boarded)
    }

    /// Leave the car at `floor`, appearing at `door_x` and heading for
    /// `drop_x`.  Records the delivery time.
    pub fn alight(&mut self, floor: FloorId, door_x: f32, drop_x: f32, now: f64) -> PassengerResult<()> {
        if floor != self.target_floor {
            return Err(PassengerError::WrongFloor { id: self.id, target: self.target_floor, floor });
        }
        self.transition(PassengerState::Alighting)?;
        self.current_floor = floor;
        self.x = door_x;
        self.drop_x = Some(drop_x);
        let assigned = self.times.assignment.unwrap_or(self.times.request);
        self.times.delivery = Some(now.max(assigned));
        Ok(())
    }

    fn transition(&mut self, to: PassengerState) -> PassengerResult<()> {
        if !self.state.can_transition_to(to) {
            return Err(PassengerError::InvalidTransition { id: self.id, from: self.state, to });
        }
        self.state = to;
        Ok(())
    }

    // ── Per-tick movement ─────────────────────────────────────────────────

    /// Advance lateral movement by `dt` seconds.
    ///
    /// `door_x` resolves a car id to its door position on this floor.
    /// Reaching the door moves `WalkingToCar → WaitingAtCar`; reaching the
    /// drop-off moves `Alighting → Delivered`.
    pub fn update<F>(&mut self, dt: f64, params: &WalkParams, door_x: F)
    where
        F: Fn(CarId) -> Option<f32>,
    {
        let dt = dt as f32;
        match self.state {
            PassengerState::AwaitingSelection => {
                if !self.focused {
                    self.wander(dt, params);
                }
            }
            PassengerState::WalkingToCar => {
                let Some(goal) = self.selected_car.and_then(&door_x) else { return };
                if self.walk_towards(goal, dt, params) {
                    self.state = PassengerState::WaitingAtCar;
                    trace!(passenger = %self.id, "reached car door");
                }
            }
            PassengerState::Alighting => {
                let goal = self.drop_x.unwrap_or(self.spawn_x);
                if self.walk_towards(goal, dt, params) {
                    self.state = PassengerState::Delivered;
                    trace!(passenger = %self.id, floor = %self.current_floor, "delivered");
                }
            }
            PassengerState::WaitingAtCar | PassengerState::Boarded | PassengerState::Delivered => {}
        }
    }

    fn wander(&mut self, dt: f32, params: &WalkParams) {
        let left  = params.wander_margin;
        let right = (params.floor_width - params.wander_margin - params.body_width).max(left);
        self.x += params.wander_speed * self.wander_sign * dt;
        if self.x < left {
            self.x = left;
            self.wander_sign = 1.0;
        } else if self.x > right {
            self.x = right;
            self.wander_sign = -1.0;
        }
    }

    /// Step toward `goal`; returns `true` once snapped onto it.
    fn walk_towards(&mut self, goal: f32, dt: f32, params: &WalkParams) -> bool {
        let gap = goal - self.x;
        if gap.abs() < params.snap_distance {
            self.x = goal;
            return true;
        }
        self.x += gap.signum() * (params.walk_speed * dt).min(gap.abs());
        false
    }

    // ── Penalty ───────────────────────────────────────────────────────────

    /// Penalty accrued so far (final once delivered).
    #[inline]
    pub fn penalty(&self, now: f64) -> f64 {
        penalty::penalty(self.coefficients, &self.times, now)
    }

    /// The final penalty, available once the delivery time is recorded.
    pub fn final_penalty(&self) -> Option<f64> {
        let delivered = self.times.delivery?;
        Some(penalty::penalty(self.coefficients, &self.times, delivered))
    }
}
