//! `CarDispatcher` — one car's motion, doors and passenger bookkeeping.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use lift_core::{CarId, Direction, FloorId, PassengerId};
use lift_passenger::{Passenger, PassengerState};
use tracing::{debug, trace};

use crate::{
    CarEvent, CarParams, DispatchError, DispatchResult, DispatchSnapshot, FloorRegistry,
    MotionState,
};

/// A passenger registered with a car but still standing on its floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitingEntry {
    pub passenger: PassengerId,
    pub target:    FloorId,
}

/// One elevator car.
///
/// The car owns the passengers on board.  Passengers who selected the car
/// but have not boarded stay with their floor; the car only records their
/// id and target in `waiting`, keyed by pickup floor.  `requests` lists the
/// pickup floors in the order they were first requested and always has the
/// same key set as `waiting`.
pub struct CarDispatcher {
    id:          CarId,
    name:        String,
    door_x:      f32,
    floor_count: u32,
    params:      CarParams,

    position:  f64,
    direction: Direction,
    motion:    MotionState,

    boarded:         Vec<Passenger>,
    waiting:         BTreeMap<FloorId, Vec<WaitingEntry>>,
    requests:        VecDeque<FloorId>,
    target_sequence: Vec<FloorId>,
}

impl CarDispatcher {
    /// A car resting idle on the ground floor, doors closed.
    pub fn new(id: CarId, name: impl Into<String>, door_x: f32, floor_count: u32, params: CarParams) -> Self {
        Self {
            id,
            name: name.into(),
            door_x,
            floor_count,
            params,
            position: 0.0,
            direction: Direction::Up,
            motion: MotionState::Idle,
            boarded: Vec::new(),
            waiting: BTreeMap::new(),
            requests: VecDeque::new(),
            target_sequence: Vec::new(),
        }
    }

    /// Initial placement on `floor`.  Only meaningful before the first update.
    pub fn with_start_floor(mut self, floor: FloorId) -> Self {
        let top = self.floor_count.saturating_sub(1);
        self.position = f64::from(floor.0.min(top));
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline] pub fn id(&self) -> CarId { self.id }
    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn door_x(&self) -> f32 { self.door_x }
    #[inline] pub fn params(&self) -> &CarParams { &self.params }
    #[inline] pub fn position(&self) -> f64 { self.position }
    #[inline] pub fn direction(&self) -> Direction { self.direction }
    #[inline] pub fn motion(&self) -> MotionState { self.motion }
    #[inline] pub fn boarded(&self) -> &[Passenger] { &self.boarded }
    #[inline] pub fn request_queue(&self) -> &VecDeque<FloorId> { &self.requests }
    #[inline] pub fn target_sequence(&self) -> &[FloorId] { &self.target_sequence }

    /// The stop the car is heading for, if any.
    #[inline]
    pub fn next_stop(&self) -> Option<FloorId> {
        self.target_sequence.first().copied()
    }

    /// Passengers registered at `floor` and not yet on board.
    pub fn waiting_at(&self, floor: FloorId) -> &[WaitingEntry] {
        self.waiting.get(&floor).map_or(&[], Vec::as_slice)
    }

    /// Number of passengers registered but not yet boarded.
    pub fn waiting_count(&self) -> usize {
        self.waiting.values().map(Vec::len).sum()
    }

    /// Boarded plus registered passengers.
    pub fn load(&self) -> usize {
        self.boarded.len() + self.waiting_count()
    }

    /// `true` while anyone is on board or registered.
    pub fn has_pending_work(&self) -> bool {
        !self.boarded.is_empty() || !self.waiting.is_empty()
    }

    /// Seconds the doors have been open, `None` when closed.
    pub fn dwell_secs(&self) -> Option<f64> {
        match self.motion {
            MotionState::DoorOpen { dwell_secs } => Some(dwell_secs),
            _ => None,
        }
    }

    /// The floor the car is at or last passed.
    ///
    /// A stationary car reports the nearest floor.  A moving car reports the
    /// last floor it passed in its direction of travel.
    pub fn current_floor(&self) -> FloorId {
        let eps = self.params.arrival_epsilon;
        let level = match (self.motion, self.direction) {
            (MotionState::Moving, Direction::Up)   => (self.position + eps).floor(),
            (MotionState::Moving, Direction::Down) => (self.position - eps).ceil(),
            _                                      => self.position.round(),
        };
        let top = self.floor_count.saturating_sub(1);
        FloorId((level.max(0.0) as u32).min(top))
    }

    /// The state the stop rule reads, detached from the car.
    pub fn snapshot(&self) -> DispatchSnapshot {
        DispatchSnapshot {
            floor:      self.current_floor(),
            direction:  self.direction,
            deliveries: self.boarded.iter().map(Passenger::target_floor).collect::<BTreeSet<_>>(),
            waiting:    self
                .waiting
                .iter()
                .map(|(&f, entries)| (f, entries.iter().map(|e| e.target).collect()))
                .collect(),
            requests:   self.requests.clone(),
        }
    }

    // ── Requests ──────────────────────────────────────────────────────────

    /// Register a passenger who has just selected this car.
    ///
    /// The pickup floor joins the request queue if it is not already there,
    /// and the target sequence is recomputed.
    pub fn add_request(&mut self, passenger: &Passenger) -> DispatchResult<()> {
        if passenger.selected_car() != Some(self.id) {
            return Err(DispatchError::WrongCar {
                car:       self.id,
                passenger: passenger.id(),
                selected:  passenger.selected_car(),
            });
        }
        let floor = passenger.current_floor();
        let entries = self.waiting.entry(floor).or_default();
        if entries.iter().any(|e| e.passenger == passenger.id()) {
            return Err(DispatchError::AlreadyRegistered { car: self.id, passenger: passenger.id() });
        }
        entries.push(WaitingEntry { passenger: passenger.id(), target: passenger.target_floor() });
        if !self.requests.contains(&floor) {
            self.requests.push_back(floor);
        }
        debug!(car = %self.name, passenger = %passenger.id(), %floor, target = %passenger.target_floor(), "request added");
        self.refresh_targets();
        Ok(())
    }

    // ── Per-tick update ───────────────────────────────────────────────────

    /// Advance the car by `dt` seconds.  `now` is the simulation time after
    /// this tick and stamps deliveries.
    pub fn update<F: FloorRegistry>(
        &mut self,
        dt:     f64,
        now:    f64,
        floors: &mut F,
    ) -> DispatchResult<Vec<CarEvent>> {
        let mut events = Vec::new();
        match self.motion {
            MotionState::Idle => {
                let here = self.current_floor();
                if self.waiting.contains_key(&here) {
                    // Someone asked for this car at the floor it rests on.
                    self.arrive(here, now, floors, &mut events)?;
                } else if !self.target_sequence.is_empty() {
                    self.depart(here, &mut events);
                }
            }
            MotionState::Moving => self.advance(dt, now, floors, &mut events)?,
            MotionState::DoorOpen { dwell_secs } => {
                self.dwell(dwell_secs, dt, floors, &mut events)?;
            }
        }
        debug_assert!(self.check_invariants(), "car {} invariants violated", self.name);
        Ok(events)
    }

    fn depart(&mut self, here: FloorId, events: &mut Vec<CarEvent>) {
        let Some(head) = self.next_stop() else {
            self.motion = MotionState::Idle;
            return;
        };
        let Some(direction) = Direction::between(here, head) else {
            // The planner never targets the car's own floor; settle instead.
            self.target_sequence.remove(0);
            return;
        };
        self.direction = direction;
        self.motion = MotionState::Moving;
        debug!(car = %self.name, from = %here, towards = %head, %direction, "departed");
        events.push(CarEvent::Departed { from: here, towards: head, direction });
    }

    fn advance<F: FloorRegistry>(
        &mut self,
        dt:     f64,
        now:    f64,
        floors: &mut F,
        events: &mut Vec<CarEvent>,
    ) -> DispatchResult<()> {
        let goal = self.next_stop().unwrap_or_else(|| self.nearest_floor_ahead());
        let gap = goal.as_position() - self.position;
        let step = self.params.speed_floors_per_sec * dt;

        if gap.abs() <= step + self.params.arrival_epsilon {
            return self.arrive(goal, now, floors, events);
        }
        self.direction = if gap > 0.0 { Direction::Up } else { Direction::Down };
        self.position += self.direction.sign() * step;
        trace!(car = %self.name, position = self.position, %goal, "moving");
        Ok(())
    }

    /// Where a moving car stops when it has no target left.
    fn nearest_floor_ahead(&self) -> FloorId {
        let eps = self.params.arrival_epsilon;
        let level = match self.direction {
            Direction::Up   => (self.position - eps).ceil(),
            Direction::Down => (self.position + eps).floor(),
        };
        let top = self.floor_count.saturating_sub(1);
        FloorId((level.max(0.0) as u32).min(top))
    }

    fn arrive<F: FloorRegistry>(
        &mut self,
        floor:  FloorId,
        now:    f64,
        floors: &mut F,
        events: &mut Vec<CarEvent>,
    ) -> DispatchResult<()> {
        self.position = floor.as_position();
        self.motion = MotionState::DoorOpen { dwell_secs: 0.0 };
        debug!(car = %self.name, %floor, "arrived");
        events.push(CarEvent::Arrived { floor });

        self.alight_at(floor, now, floors, events)?;
        self.board_at(floor, floors, events)?;
        self.refresh_targets();
        self.face_next_stop(floor);
        Ok(())
    }

    fn alight_at<F: FloorRegistry>(
        &mut self,
        floor:  FloorId,
        now:    f64,
        floors: &mut F,
        events: &mut Vec<CarEvent>,
    ) -> DispatchResult<()> {
        let (leaving, staying): (Vec<_>, Vec<_>) = std::mem::take(&mut self.boarded)
            .into_iter()
            .partition(|p| p.target_floor() == floor);
        self.boarded = staying;

        let drop_x = floors.spawn_point_x(floor).unwrap_or(self.door_x);
        let mut leaving = leaving.into_iter();
        while let Some(mut passenger) = leaving.next() {
            if let Err(e) = passenger.alight(floor, self.door_x, drop_x, now) {
                // Still inside: keep this rider and everyone behind them.
                self.boarded.push(passenger);
                self.boarded.extend(leaving);
                return Err(e.into());
            }
            debug!(car = %self.name, passenger = %passenger.id(), %floor, "alighted");
            events.push(CarEvent::Alighted { passenger: passenger.id(), floor });
            floors.add_arrived_passenger(floor, passenger);
        }
        Ok(())
    }

    /// Board the passengers standing at the doors on `floor`.
    ///
    /// An empty car takes everyone; a loaded car only takes passengers
    /// heading the way it is travelling.  Returns `true` if anyone boarded.
    ///
    /// A passenger that fails to board goes back to the floor before the
    /// error is returned; earlier boarders stay on board.
    fn board_at<F: FloorRegistry>(
        &mut self,
        floor:  FloorId,
        floors: &mut F,
        events: &mut Vec<CarEvent>,
    ) -> DispatchResult<bool> {
        let Some(entries) = self.waiting.get(&floor) else { return Ok(false) };
        let car_empty = self.boarded.is_empty();
        let direction = self.direction;

        let chosen: Vec<PassengerId> = entries
            .iter()
            .filter(|e| {
                floors
                    .passenger(floor, e.passenger)
                    .is_some_and(|p| p.state() == PassengerState::WaitingAtCar)
            })
            .filter(|e| car_empty || direction.is_ahead(floor, e.target))
            .map(|e| e.passenger)
            .collect();
        if chosen.is_empty() {
            return Ok(false);
        }

        let mut taken = Vec::with_capacity(chosen.len());
        let mut outcome: DispatchResult<()> = Ok(());
        for id in chosen {
            let Some(mut passenger) = floors.remove_passenger(floor, id) else {
                outcome = Err(DispatchError::PassengerMissing { car: self.id, passenger: id, floor });
                break;
            };
            if let Err(e) = passenger.board() {
                floors.return_passenger(floor, passenger);
                outcome = Err(e.into());
                break;
            }
            debug!(car = %self.name, passenger = %id, %floor, target = %passenger.target_floor(), "boarded");
            events.push(CarEvent::Boarded { passenger: id, floor });
            self.boarded.push(passenger);
            taken.push(id);
        }
        self.forget_waiting(floor, &taken);
        outcome.map(|()| true)
    }

    /// Drop boarded passengers from `waiting`; retire the floor's request
    /// once nobody is left there.
    fn forget_waiting(&mut self, floor: FloorId, boarded: &[PassengerId]) {
        let now_empty = match self.waiting.get_mut(&floor) {
            Some(entries) => {
                entries.retain(|e| !boarded.contains(&e.passenger));
                entries.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.waiting.remove(&floor);
            self.requests.retain(|&f| f != floor);
        }
    }

    fn dwell<F: FloorRegistry>(
        &mut self,
        dwell_secs: f64,
        dt:         f64,
        floors:     &mut F,
        events:     &mut Vec<CarEvent>,
    ) -> DispatchResult<()> {
        let here = self.current_floor();
        if self.board_at(here, floors, events)? {
            self.refresh_targets();
            self.face_next_stop(here);
        }

        if self.has_walkers_to(here, floors) {
            self.motion = MotionState::DoorOpen { dwell_secs: 0.0 };
            return Ok(());
        }

        let dwell_secs = dwell_secs + dt;
        if dwell_secs < self.params.door_dwell_secs {
            self.motion = MotionState::DoorOpen { dwell_secs };
            return Ok(());
        }

        debug!(car = %self.name, floor = %here, "doors closed");
        events.push(CarEvent::DoorsClosed { floor: here });
        self.motion = MotionState::Idle;
        if self.target_sequence.is_empty() {
            debug!(car = %self.name, floor = %here, "idle");
            events.push(CarEvent::WentIdle { floor: here });
        } else {
            self.depart(here, events);
        }
        Ok(())
    }

    /// `true` if a registered passenger on `floor` is still walking over.
    fn has_walkers_to<F: FloorRegistry>(&self, floor: FloorId, floors: &F) -> bool {
        self.waiting_at(floor).iter().any(|e| {
            floors
                .passenger(floor, e.passenger)
                .is_some_and(|p| p.is_walking_to(self.id))
        })
    }

    /// Turn a car standing at `here` towards its next stop.  Passengers who
    /// reach the doors later are matched against this direction.
    fn face_next_stop(&mut self, here: FloorId) {
        if let Some(direction) = self.next_stop().and_then(|head| Direction::between(here, head)) {
            self.direction = direction;
        }
    }

    fn refresh_targets(&mut self) {
        self.target_sequence = self.snapshot().target_sequence(self.params.max_lookahead);
        trace!(car = %self.name, sequence = ?self.target_sequence, "targets recomputed");
    }

    // ── Invariants ────────────────────────────────────────────────────────

    /// Structural invariants of the car's bookkeeping.
    ///
    /// - `requests` holds each floor at most once and exactly the floors
    ///   with registered passengers.
    /// - no boarded passenger is still registered as waiting.
    /// - consecutive stops differ; a stationary car never heads for its own floor.
    ///
    /// Only the head of `target_sequence` is checked against the current
    /// floor.  A later entry may revisit it, as in `[6, 3]` from floor 3 when
    /// a rider boarding at 6 is bound for 3.
    pub fn check_invariants(&self) -> bool {
        let unique = self
            .requests
            .iter()
            .enumerate()
            .all(|(i, f)| !self.requests.iter().skip(i + 1).any(|g| g == f));
        let queue_matches_waiting = self.requests.len() == self.waiting.len()
            && self.requests.iter().all(|f| self.waiting.get(f).is_some_and(|v| !v.is_empty()));
        let disjoint = self.boarded.iter().all(|p| {
            self.waiting.values().flatten().all(|e| e.passenger != p.id())
        });
        let no_repeats = self.target_sequence.windows(2).all(|w| w[0] != w[1]);
        let head_ok = self.motion == MotionState::Moving
            || self.next_stop() != Some(self.current_floor());

        unique && queue_matches_waiting && disjoint && no_repeats && head_ok
    }
}

impl std::fmt::Debug for CarDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarDispatcher")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("position", &self.position)
            .field("direction", &self.direction)
            .field("motion", &self.motion)
            .field("boarded", &self.boarded.len())
            .field("requests", &self.requests)
            .field("target_sequence", &self.target_sequence)
            .finish()
    }
}
